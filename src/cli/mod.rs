//! Command-line parsing for the TD scraper.
//!
//! Parsing stays here; `app` owns dispatch and the pipelines own the work.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_HISTORY_DAYS, HISTORY_OUTPUT, REALTIME_OUTPUT};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "td", version, about = "Tesouro Direto price scraper (JSON output)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape current redemption prices and yields (default command).
    Resgatar(ResgatarArgs),
    /// Build the historical price/rate series from the Tesouro Transparente export.
    Historico(HistoricoArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct ResgatarArgs {
    /// Keep only rows whose title contains this text (case-insensitive).
    #[arg(long, default_value = "")]
    pub contains: String,

    /// Output JSON path.
    #[arg(short, long, default_value = REALTIME_OUTPUT)]
    pub output: PathBuf,
}

#[derive(Debug, Parser, Clone)]
pub struct HistoricoArgs {
    /// Number of most recent base dates to keep.
    #[arg(long, default_value_t = DEFAULT_HISTORY_DAYS)]
    pub days: usize,

    /// Output JSON path.
    #[arg(short, long, default_value = HISTORY_OUTPUT)]
    pub output: PathBuf,
}

/// Rewrite argv so `td` defaults to `td resgatar`.
///
/// Rules:
/// - `td`                      -> `td resgatar`
/// - `td --contains ipca ...`  -> `td resgatar --contains ipca ...`
/// - `td --help/--version/-h`  -> unchanged (show top-level help/version)
pub fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("resgatar".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "resgatar".to_string());
    }
    argv
}
