//! govm library.
//!
//! This crate installs official Go releases side by side under one root and
//! switches between them with a pair of `current` links. It is used by the
//! `govm` CLI binary and can be driven programmatically, with network and
//! archive access injected through traits.
//!
//! # Modules
//!
//! - [`activate`] - Switching the active version
//! - [`catalog`] - Remote tag feeds, grouped by major.minor
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Install root and endpoint settings
//! - [`dirs`] - Home directory lookup behind a mockable trait
//! - [`download`] - Archive downloads over HTTP
//! - [`error`] - Error types with recovery hints
//! - [`extraction`] - tar.gz and zip unpacking
//! - [`install`] - Download-and-unpack install flow
//! - [`list`] - Installed and remote listings
//! - [`list_output`] - Output formatting for listings
//! - [`logging`] - Diagnostic logger setup
//! - [`output`] - Status lines and shell setup snippets
//! - [`platform`] - Host OS/arch in Go's naming
//! - [`resolver`] - Version token resolution
//! - [`self_update`] - Replacing the govm binary
//! - [`store`] - On-disk layout of the install root
//! - [`token`] - Version token parsing
//! - [`uninstall`] - Removing installed versions
//! - [`version`] - Lenient Go version ordering

pub mod activate;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod dirs;
pub mod download;
pub mod error;
pub mod extraction;
pub mod install;
pub mod list;
pub mod list_output;
pub mod logging;
pub mod output;
pub mod platform;
pub mod resolver;
pub mod self_update;
pub mod store;
pub mod token;
pub mod uninstall;
pub mod version;

#[cfg(test)]
pub(crate) mod test_utils;
