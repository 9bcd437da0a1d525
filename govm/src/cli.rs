//! CLI argument definitions for govm.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint so parsing can be tested without running
//! commands.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Manage installed Go toolchains.
#[derive(Parser, Debug, Default)]
#[command(name = "govm")]
#[command(version, about)]
#[command(long_about = concat!(
    "Manage installed Go toolchains.\n\n",
    "govm downloads official Go releases into ~/.govm/versions and switches ",
    "between them by pointing ~/.govm/current/bin and ~/.govm/current/go at ",
    "the selected release.",
))]
#[command(after_help = concat!(
    "VERSION TOKENS:\n",
    "  1.16.1              Exact release\n",
    "  1.16, 1.16.x        Newest final release of 1.16\n",
    "  1.16@latest         Newest final release of 1.16\n",
    "  1.16@dev-latest     Newest release of 1.16, including rc/beta\n",
    "  latest              Newest final release\n",
    "  dev-latest          Newest release, including rc/beta\n\n",
    "SHELL SETUP:\n",
    "  export PATH=\"$HOME/.govm/current/bin:$HOME/.govm/bin:$PATH\"\n",
    "  export GOROOT=\"$HOME/.govm/current/go\"\n\n",
    "EXAMPLES:\n",
    "  Install and activate the newest release:\n",
    "    $ govm install latest && govm use latest\n\n",
    "  Show what can be installed:\n",
    "    $ govm ls-remote\n",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options accepted before or after any subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Install root [default: $GOVM_HOME or ~/.govm].
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<Utf8PathBuf>,

    /// Increase diagnostic output (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress status output (errors still shown).
    #[arg(short, long, global = true, conflicts_with = "verbosity")]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List installed versions.
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// List versions available for download.
    LsRemote(ListArgs),

    /// Download and unpack a version.
    Install(VersionArgs),

    /// Make an installed version current.
    Use(VersionArgs),

    /// Remove an installed version.
    Uninstall(VersionArgs),

    /// Replace this binary with the newest govm release.
    SelfUpdate,
}

/// Arguments for the listing commands.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArgs {
    /// Output in JSON format for scripting.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for commands that take a version token.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionArgs {
    /// Version token, e.g. 1.16.1, 1.16.x or latest.
    pub version: Option<String>,
}

impl VersionArgs {
    /// The version token, or an empty string when none was given.
    #[must_use]
    pub fn token(&self) -> &str {
        self.version.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
