//! govm CLI entrypoint.
//!
//! This binary installs Go releases and switches between them. Listings go
//! to stdout; status lines and errors go to stderr.

use clap::{CommandFactory, Parser};
use std::io::{self, Write};

use govm::activate::{UseOutcome, use_version};
use govm::catalog::{HttpTagSource, RemoteCatalog};
use govm::cli::{Cli, Command, VersionArgs};
use govm::config::Settings;
use govm::dirs::SystemBaseDirs;
use govm::download::HttpDownloader;
use govm::error::{GovmError, Result};
use govm::extraction::ArchiveUnpacker;
use govm::install::Installer;
use govm::list::{run_list, run_ls_remote};
use govm::logging::init_logging;
use govm::output::{shell_setup_hint, write_stderr_line};
use govm::platform::Platform;
use govm::self_update::{SelfUpdater, replace_running_executable};
use govm::store::LocalStore;
use govm::token::normalize_version_arg;
use govm::uninstall::uninstall;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbosity, cli.global.quiet);

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let run_result = if cli.global.quiet {
        run(&cli, &mut stdout, &mut io::sink())
    } else {
        run(&cli, &mut stdout, &mut stderr)
    };
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write, status: &mut dyn Write) -> Result<()> {
    let Some(command) = &cli.command else {
        return writeln!(stdout, "{}", Cli::command().render_help())
            .map_err(|source| GovmError::WriteFailed { source });
    };

    let settings = Settings::load(cli.global.root.as_deref(), &SystemBaseDirs)?;
    let store = LocalStore::new(settings.root.clone());

    match command {
        Command::List(args) => run_list(&store, args.json, stdout),
        Command::LsRemote(args) => {
            write_stderr_line(status, "Fetching remote versions");
            run_ls_remote(&mut remote_catalog(&settings), args.json, stdout)
        }
        Command::Install(args) => install(&settings, &store, args, !cli.global.quiet, status),
        Command::Use(args) => activate(&settings, &store, args, status),
        Command::Uninstall(args) => {
            uninstall(&normalize_version_arg(args.token()), &store, status)
        }
        Command::SelfUpdate => self_update(&settings, !cli.global.quiet, status),
    }
}

fn remote_catalog(settings: &Settings) -> RemoteCatalog {
    let source = HttpTagSource::new(settings.tags_url.clone(), settings.self_tags_url.clone());
    RemoteCatalog::new(Box::new(source))
}

/// Downloads and unpacks the requested version.
fn install(
    settings: &Settings,
    store: &LocalStore,
    args: &VersionArgs,
    show_progress: bool,
    status: &mut dyn Write,
) -> Result<()> {
    let platform = Platform::current()?;
    let downloader = HttpDownloader::new(show_progress);
    let installer = Installer::new(
        store,
        &platform,
        &settings.registry,
        &downloader,
        &ArchiveUnpacker,
    );
    let token = normalize_version_arg(args.token());
    installer.install(&token, &mut remote_catalog(settings), status)?;
    Ok(())
}

/// Switches versions and explains the shell setup when it is missing.
fn activate(
    settings: &Settings,
    store: &LocalStore,
    args: &VersionArgs,
    status: &mut dyn Write,
) -> Result<()> {
    let token = normalize_version_arg(args.token());
    let outcome = use_version(&token, store, &mut remote_catalog(settings), status)?;
    if let UseOutcome::Switched { .. } = outcome {
        if let Some(hint) = shell_setup_hint(&store.current_bin(), &store.current_go()) {
            write_stderr_line(status, "");
            write_stderr_line(status, hint);
        }
    }
    Ok(())
}

fn self_update(settings: &Settings, show_progress: bool, status: &mut dyn Write) -> Result<()> {
    let platform = Platform::current()?;
    let downloader = HttpDownloader::new(show_progress);
    let updater = SelfUpdater::new(
        &platform,
        &settings.self_download_url,
        &downloader,
        &replace_running_executable,
    );
    updater.run(&mut remote_catalog(settings), status)?;
    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            err.exit_code()
        }
    }
}
