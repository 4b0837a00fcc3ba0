//! Command handlers. Transform commands return their rendered output for `main` to print.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use natal_ingest::{
    BalanceReport, SourceMode, balance_with_report, load, load_collection, write_dataset,
};
use natal_model::BalancedDataset;
use natal_views::{prepare_cigarettes, prepare_crosstab, prepare_pairwise, prepare_univariate};

use crate::cli::{
    BalanceArgs, CigarettesArgs, ConditionsArgs, HistogramArgs, OutputArgs, PairArgs, SourceArgs,
};
use crate::output::{render_crosstab, render_features, render_frame};

/// File name of the case collection written by `balance`.
pub const CASE_FILE: &str = "case.csv";
/// File name of the control collection written by `balance`.
pub const CONTROL_FILE: &str = "control.csv";

/// Loads and, in raw mode, balances the two extracts.
pub fn load_dataset(source: &SourceArgs) -> Result<BalancedDataset> {
    let options = source.load_options();
    load(&source.case, &source.control, &options).with_context(|| {
        format!(
            "load {} and {}",
            source.case.display(),
            source.control.display()
        )
    })
}

pub fn run_features(args: OutputArgs) -> Result<String> {
    render_features(args.format)
}

pub fn run_histogram(dataset: &BalancedDataset, args: &HistogramArgs) -> Result<String> {
    let df = prepare_univariate(dataset, &args.feature)
        .with_context(|| format!("histogram of {}", args.feature))?;
    render_frame(&df, args.output.format)
}

pub fn run_pair(dataset: &BalancedDataset, args: &PairArgs) -> Result<String> {
    let df = prepare_pairwise(dataset, &args.feature_a, &args.feature_b)
        .with_context(|| format!("pair {} x {}", args.feature_a, args.feature_b))?;
    render_frame(&df, args.output.format)
}

pub fn run_cigarettes(dataset: &BalancedDataset, args: &CigarettesArgs) -> Result<String> {
    let df = prepare_cigarettes(dataset, args.log_scale).context("reshape cigarette counts")?;
    render_frame(&df, args.output.format)
}

pub fn run_conditions(dataset: &BalancedDataset, args: &ConditionsArgs) -> Result<String> {
    let table = prepare_crosstab(dataset, args.fields.as_slice()).context("cross-tabulate conditions")?;
    render_crosstab(table.as_ref(), args.output.format)
}

/// Balances raw extracts and writes them in processed form.
///
/// Always reads the sources as raw natality files regardless of `--raw`.
pub fn run_balance(source: &SourceArgs, args: &BalanceArgs) -> Result<BalanceReport> {
    let span = info_span!("balance", out_dir = %args.out_dir.display());
    let _guard = span.enter();

    let case = load_collection(&source.case, SourceMode::Raw)
        .with_context(|| format!("load case extract {}", source.case.display()))?;
    let control = load_collection(&source.control, SourceMode::Raw)
        .with_context(|| format!("load control extract {}", source.control.display()))?;
    let (dataset, report) =
        balance_with_report(&case, &control, source.seed).context("balance extracts")?;

    ensure_dir(&args.out_dir)?;
    let case_path = args.out_dir.join(CASE_FILE);
    let control_path = args.out_dir.join(CONTROL_FILE);
    write_dataset(&dataset, &case_path, &control_path).context("write balanced dataset")?;
    info!(
        case_rows = dataset.case_count(),
        control_rows = dataset.control_count(),
        "balance complete"
    );
    Ok(report)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))
}
