//! Command-line configuration.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser};

use crate::model::{ResultSet, Verbosity};

#[derive(Parser, Debug)]
#[command(name = "release-menu", version, about = "Review pending container image updates and pick which to release")]
pub struct Cli {
    /// JSON result set to review ("-" reads stdin)
    #[arg(value_name = "RESULTS", default_value = "-")]
    pub results: PathBuf,

    /// Show skipped resources (-v) and ignored ones too (-vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Select updates interactively instead of printing the table
    #[arg(short, long)]
    pub interactive: bool,

    /// Write the confirmed selection as JSON to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Append logs to this file
    #[arg(long, env = "RELEASE_MENU_LOG", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, env = "RELEASE_MENU_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from(self.verbose)
    }

    pub fn reads_stdin(&self) -> bool {
        self.results == Path::new("-")
    }
}

/// Load a result set from `path`, or from stdin when `path` is `-`.
pub fn load_results(path: &Path) -> anyhow::Result<ResultSet> {
    if path == Path::new("-") {
        return parse_results(io::stdin().lock()).context("failed to read results from stdin");
    }
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    parse_results(BufReader::new(file)).with_context(|| format!("failed to read results from {}", path.display()))
}

pub fn parse_results(reader: impl Read) -> anyhow::Result<ResultSet> {
    let results = serde_json::from_reader(reader).context("invalid result set JSON")?;
    Ok(results)
}
