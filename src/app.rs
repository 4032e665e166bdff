//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging
//! - parses CLI arguments
//! - resolves configuration (`.env` + environment + flags)
//! - runs the selected pipeline and prints its confirmation line

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, HistoricoArgs, ResgatarArgs};
use crate::config::{HistoryConfig, PortalConfig};
use crate::error::AppError;

pub mod pipeline;

const DEFAULT_LOG_FILTER: &str = "td_scrape=info";

/// Entry point for the `td` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();

    let argv = crate::cli::rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Resgatar(args) => handle_resgatar(args),
        Command::Historico(args) => handle_historico(args),
    }
}

fn handle_resgatar(args: ResgatarArgs) -> Result<(), AppError> {
    let config = portal_config_from_args(PortalConfig::from_env()?, &args);
    pipeline::run_resgatar(&config)?;
    println!("{}", crate::report::format_saved(&config.output_path));
    Ok(())
}

fn handle_historico(args: HistoricoArgs) -> Result<(), AppError> {
    let config = history_config_from_args(HistoryConfig::from_env()?, &args);
    let run = pipeline::run_historico(&config)?;
    println!(
        "{}",
        crate::report::format_history_summary(&config.output_path, &run.payload, run.changed)
    );
    Ok(())
}

pub fn portal_config_from_args(base: PortalConfig, args: &ResgatarArgs) -> PortalConfig {
    PortalConfig {
        output_path: args.output.clone(),
        ..base
    }
    .with_contains(Some(args.contains.as_str()))
}

pub fn history_config_from_args(base: HistoryConfig, args: &HistoricoArgs) -> HistoryConfig {
    HistoryConfig {
        output_path: args.output.clone(),
        days: args.days,
        ..base
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn flags_override_config() {
        let args = ResgatarArgs {
            contains: " Selic ".to_string(),
            output: PathBuf::from("out/rt.json"),
        };
        let config = portal_config_from_args(PortalConfig::default(), &args);
        assert_eq!(config.contains.as_deref(), Some("selic"));
        assert_eq!(config.output_path, PathBuf::from("out/rt.json"));
        assert_eq!(config.csv_url, crate::config::URL_RESGATAR);

        let args = HistoricoArgs {
            days: 7,
            output: PathBuf::from("h.json"),
        };
        let config = history_config_from_args(HistoryConfig::default(), &args);
        assert_eq!(config.days, 7);
        assert_eq!(config.output_path, PathBuf::from("h.json"));
    }

    #[test]
    fn empty_contains_disables_filter() {
        let args = ResgatarArgs {
            contains: String::new(),
            output: PathBuf::from("x.json"),
        };
        assert_eq!(portal_config_from_args(PortalConfig::default(), &args).contains, None);
    }
}
