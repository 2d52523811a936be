use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::Context;
use clap::Parser;
use signal_hook::consts::{SIGINT, SIGTERM};

use release_menu::config::{self, Cli};
use release_menu::logging;
use release_menu::menu::{KeySource, TerminalKeys};
use release_menu::model::{ResultSet, Verbosity};
use release_menu::{Menu, MenuError, Selection};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let _log = logging::init(cli.log_file.as_deref(), &cli.log_level)?;

    let results = config::load_results(&cli.results)?;
    tracing::info!(resources = results.len(), verbosity = ?cli.verbosity(), "loaded release results");

    if !cli.interactive {
        let mut menu = Menu::new(io::stdout().lock(), &results, cli.verbosity());
        menu.print().context("failed to print results")?;
        return Ok(ExitCode::SUCCESS);
    }

    // Raw mode swallows Ctrl-C as a key; signals from elsewhere end the read loop.
    let should_quit = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGINT, Arc::clone(&should_quit))?;
    signal_hook::flag::register(SIGTERM, Arc::clone(&should_quit))?;
    let mut keys = TerminalKeys::with_quit_flag(should_quit);

    // Keep frames out of redirected stdout, which only receives the selection.
    let outcome = if io::stdout().is_terminal() {
        run_menu(io::stdout().lock(), &results, cli.verbosity(), &mut keys)
    } else {
        run_menu(io::stderr().lock(), &results, cli.verbosity(), &mut keys)
    };

    match outcome {
        Ok(selection) => {
            tracing::info!(
                resources = selection.len(),
                updates = selection.values().map(Vec::len).sum::<usize>(),
                "selection confirmed"
            );
            write_selection(cli, &selection)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(MenuError::NoChanges) => {
            println!("{}", MenuError::NoChanges);
            Ok(ExitCode::SUCCESS)
        }
        Err(MenuError::Aborted) => {
            tracing::info!("menu aborted");
            eprintln!("{}", MenuError::Aborted);
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err).context("interactive menu failed"),
    }
}

fn run_menu<W: Write, K: KeySource>(
    out: W,
    results: &ResultSet,
    verbosity: Verbosity,
    keys: &mut K,
) -> Result<Selection, MenuError> {
    Menu::new(out, results, verbosity).run(keys)
}

fn write_selection(cli: &Cli, selection: &Selection) -> anyhow::Result<()> {
    match &cli.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut out, selection)?;
            writeln!(out)?;
            out.flush()?;
        }
        None => {
            let mut out = io::stdout().lock();
            serde_json::to_writer_pretty(&mut out, selection)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
