//! Diagnostic logging setup.
//!
//! Status lines for the user go through [`crate::output`]; this module only
//! wires the `log` facade to a terminal logger on stderr.

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Maps the global `-v`/`-q` flags to a log level.
///
/// # Examples
///
/// ```
/// use govm::logging::level_for;
/// use simplelog::LevelFilter;
///
/// assert_eq!(level_for(0, false), LevelFilter::Warn);
/// assert_eq!(level_for(2, false), LevelFilter::Debug);
/// assert_eq!(level_for(0, true), LevelFilter::Error);
/// ```
#[must_use]
pub fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs a stderr logger for govm's own records.
///
/// Calling this twice keeps the first logger.
pub fn init_logging(verbosity: u8, quiet: bool) {
    let config = ConfigBuilder::new()
        .add_filter_allow_str("govm")
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();

    if TermLogger::init(
        level_for(verbosity, quiet),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .is_err()
    {
        log::debug!("logger already initialised");
    }
}
