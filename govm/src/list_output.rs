//! Output formatting for version listings.
//!
//! Installed and remote listings each have a human-readable rendering and a
//! JSON rendering for scripting.

use serde::Serialize;

use crate::catalog::{GroupedVersions, group_label};
use crate::list::InstalledVersions;

/// Releases printed per line of `ls-remote` output.
pub const VERSIONS_PER_LINE: usize = 6;

/// Format installed versions for human-readable output.
///
/// The current version is suffixed with `*` and repeated on a trailing
/// `current:` line.
///
/// # Examples
///
/// ```
/// use govm::list::InstalledVersions;
/// use govm::list_output::format_installed_human;
///
/// let installed = InstalledVersions::new(vec!["1.17".to_owned()], Some("1.17".to_owned()));
/// assert_eq!(format_installed_human(&installed), "1.17*\n\ncurrent: 1.17");
/// ```
#[must_use]
pub fn format_installed_human(installed: &InstalledVersions) -> String {
    if installed.is_empty() {
        return String::from(
            "No versions installed.\n\nRun `govm install latest` to install the newest release.",
        );
    }

    let current = installed.current();
    let mut lines: Vec<String> = installed
        .versions()
        .iter()
        .map(|version| {
            if current == Some(version.as_str()) {
                format!("{version}*")
            } else {
                version.clone()
            }
        })
        .collect();
    if let Some(current) = current {
        lines.push(String::new());
        lines.push(format!("current: {current}"));
    }
    lines.join("\n")
}

/// Format installed versions as JSON.
#[must_use]
pub fn format_installed_json(installed: &InstalledVersions) -> String {
    let json = InstalledJson {
        current: installed.current(),
        installed: installed.versions(),
    };
    serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_owned())
}

/// Format the remote catalog for human-readable output.
///
/// Each group starts with its label and a tab; releases follow, at most
/// [`VERSIONS_PER_LINE`] per line, with a blank line between groups.
///
/// # Examples
///
/// ```
/// use govm::catalog::GroupedVersions;
/// use govm::list_output::format_remote_human;
///
/// let grouped = GroupedVersions::from_versions(["1", "1.0.1", "1.16", "1.16.1"]);
/// assert_eq!(format_remote_human(&grouped), "1\t1.0.1\n\n1.16\t1.16  1.16.1");
/// ```
#[must_use]
pub fn format_remote_human(grouped: &GroupedVersions) -> String {
    if grouped.is_empty() {
        return String::from("No remote versions found.");
    }

    grouped
        .iter()
        .map(|(key, releases)| {
            let rows: Vec<String> = releases
                .chunks(VERSIONS_PER_LINE)
                .map(|row| row.join("  "))
                .collect();
            format!("{}\t{}", group_label(key), rows.join("\n\t"))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format the remote catalog as JSON.
#[must_use]
pub fn format_remote_json(grouped: &GroupedVersions) -> String {
    let groups: Vec<GroupJson<'_>> = grouped
        .iter()
        .map(|(group, versions)| GroupJson { group, versions })
        .collect();
    serde_json::to_string_pretty(&groups).unwrap_or_else(|_| "[]".to_owned())
}

#[derive(Debug, Serialize)]
struct InstalledJson<'a> {
    current: Option<&'a str>,
    installed: &'a [String],
}

#[derive(Debug, Serialize)]
struct GroupJson<'a> {
    group: &'a str,
    versions: &'a [String],
}
