//! User-facing output helpers.
//!
//! Status lines go to an injected writer (stderr in production, a sink when
//! `--quiet` is set). This module also renders the shell snippets that put
//! the active toolchain on `PATH` and set `GOROOT`.

use camino::Utf8Path;
use std::ffi::OsStr;
use std::fmt::Display;
use std::io::Write;
use std::path::Path;

/// Writes one status line, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort status output; a closed stderr must not fail the command.
    }
}

/// Shell configuration snippets for different shells.
#[derive(Debug, Clone)]
pub struct ShellSnippet {
    /// Export lines for bash/zsh.
    pub bash: String,
    /// Set lines for fish shell.
    pub fish: String,
    /// Assignment lines for PowerShell.
    pub powershell: String,
}

impl ShellSnippet {
    /// Create snippets that set `GOROOT` to `goroot` and prepend `bin_dir`
    /// to `PATH`.
    ///
    /// # Example
    ///
    /// ```
    /// use camino::Utf8PathBuf;
    /// use govm::output::ShellSnippet;
    ///
    /// let bin = Utf8PathBuf::from("/home/user/.govm/current/bin");
    /// let goroot = Utf8PathBuf::from("/home/user/.govm/current/go");
    /// let snippet = ShellSnippet::new(&bin, &goroot);
    ///
    /// assert!(snippet.bash.contains("export GOROOT="));
    /// assert!(snippet.bash.contains("/home/user/.govm/current/bin:$PATH"));
    /// ```
    #[must_use]
    pub fn new(bin_dir: &Utf8Path, goroot: &Utf8Path) -> Self {
        Self {
            bash: format!("export GOROOT=\"{goroot}\"\n  export PATH=\"{bin_dir}:$PATH\""),
            fish: format!("set -gx GOROOT \"{goroot}\"\n  set -gx PATH \"{bin_dir}\" $PATH"),
            powershell: format!(
                "$env:GOROOT = \"{goroot}\"\n  $env:PATH = \"{bin_dir};\" + $env:PATH"
            ),
        }
    }

    /// Format the snippet for display to the user.
    #[must_use]
    pub fn display_text(&self) -> String {
        format!(
            concat!(
                "Add the following to your shell configuration:\n\n",
                "  # bash/zsh (~/.bashrc, ~/.zshrc)\n",
                "  {}\n\n",
                "  # fish (~/.config/fish/config.fish)\n",
                "  {}\n\n",
                "  # PowerShell ($PROFILE)\n",
                "  {}"
            ),
            self.bash, self.fish, self.powershell
        )
    }
}

/// Returns `true` when `dir` is one of the entries of `PATH`.
#[must_use]
pub fn is_directory_in_path(dir: &Path) -> bool {
    std::env::var_os("PATH").is_some_and(|path| path_list_contains(&path, dir))
}

fn path_list_contains(path_list: &OsStr, dir: &Path) -> bool {
    std::env::split_paths(path_list).any(|entry| entry == dir)
}

/// Setup instructions to show after switching versions, or `None` when
/// `bin_dir` is already on `PATH`.
#[must_use]
pub fn shell_setup_hint(bin_dir: &Utf8Path, goroot: &Utf8Path) -> Option<String> {
    if is_directory_in_path(bin_dir.as_std_path()) {
        return None;
    }
    Some(ShellSnippet::new(bin_dir, goroot).display_text())
}
