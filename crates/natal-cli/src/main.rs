//! Natality case-control comparison CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use natal_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use natal_cli::commands::{
    load_dataset, run_balance, run_cigarettes, run_conditions, run_features, run_histogram,
    run_pair,
};
use natal_cli::logging::{LogConfig, LogFormat, init_logging};
use natal_cli::output::render_balance_report;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    let output = match &cli.command {
        Command::Features(args) => run_features(*args)?,
        Command::Balance(args) => {
            let report = run_balance(&cli.source, args)?;
            println!("Output: {}", args.out_dir.display());
            render_balance_report(&report).to_string()
        }
        Command::Histogram(args) => run_histogram(&load_dataset(&cli.source)?, args)?,
        Command::Pair(args) => run_pair(&load_dataset(&cli.source)?, args)?,
        Command::Cigarettes(args) => run_cigarettes(&load_dataset(&cli.source)?, args)?,
        Command::Conditions(args) => run_conditions(&load_dataset(&cli.source)?, args)?,
    };
    println!("{output}");
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
