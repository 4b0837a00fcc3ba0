//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use natal_ingest::LoadOptions;

#[derive(Parser)]
#[command(
    name = "natal",
    version,
    about = "Compare infant-death cases against surviving-birth controls",
    long_about = "Compare natality records of infants who died (cases) against a\n\
                  random sample of surviving births (controls).\n\n\
                  Loads both CSV extracts once, balances them, and prints\n\
                  distribution, repeated-measure and cross-tabulation views."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// Locations and shape of the two input extracts.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Case extract (infants who died).
    #[arg(long = "case", value_name = "CSV", default_value = "d_smp.csv", global = true)]
    pub case: PathBuf,

    /// Control extract (surviving births).
    #[arg(
        long = "control",
        value_name = "CSV",
        default_value = "l_smp.csv",
        global = true
    )]
    pub control: PathBuf,

    /// Treat the extracts as raw natality files: rename and balance on load.
    #[arg(long = "raw", global = true)]
    pub raw: bool,

    /// Seed for control sampling (raw mode only).
    #[arg(long = "seed", value_name = "N", global = true)]
    pub seed: Option<u64>,
}

impl SourceArgs {
    /// Load options selected by the flags.
    pub fn load_options(&self) -> LoadOptions {
        let options = if self.raw {
            LoadOptions::raw()
        } else {
            LoadOptions::processed()
        };
        options.with_seed(self.seed)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List permitted features and condition fields.
    Features(OutputArgs),

    /// Distribution of one feature, labeled by group.
    Histogram(HistogramArgs),

    /// Joint distribution of two features, labeled by group.
    Pair(PairArgs),

    /// Trimester cigarette counts in long form.
    Cigarettes(CigarettesArgs),

    /// Cross-tabulate birth conditions by outcome.
    Conditions(ConditionsArgs),

    /// Balance raw extracts and write them as processed CSV files.
    Balance(BalanceArgs),
}

#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Output format.
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct HistogramArgs {
    /// Feature name (see `natal features`).
    #[arg(value_name = "FEATURE")]
    pub feature: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct PairArgs {
    #[arg(value_name = "FEATURE_A")]
    pub feature_a: String,

    #[arg(value_name = "FEATURE_B")]
    pub feature_b: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct CigarettesArgs {
    /// Report base-10 logarithms of the counts.
    #[arg(long = "log")]
    pub log_scale: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct ConditionsArgs {
    /// Condition fields to group by, in display order.
    #[arg(value_name = "FIELD")]
    pub fields: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct BalanceArgs {
    /// Directory receiving `case.csv` and `control.csv`.
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Json,
    Table,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
