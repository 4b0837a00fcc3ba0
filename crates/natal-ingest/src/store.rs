//! Record store: loads the case and control collections from CSV sources.

use std::path::Path;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use natal_model::BalancedDataset;

use crate::balance::balance;
use crate::csv::{read_csv_frame, read_csv_header, read_csv_text_columns, write_csv_frame};
use crate::error::Result;
use crate::schema::{
    check_same_columns, harmonise_dtypes, rename_raw_columns, resolve_raw_columns,
};

/// Shape of the external sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceMode {
    /// Raw natality extracts: whitelist, rename, then balance.
    Raw,
    /// Already in record schema and already balanced: load verbatim.
    #[default]
    Processed,
}

/// Options controlling how the dataset is assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    pub mode: SourceMode,
    /// Seed for control sampling. Only used in raw mode.
    pub seed: Option<u64>,
}

impl LoadOptions {
    /// Options for raw extracts.
    #[must_use]
    pub fn raw() -> Self {
        Self {
            mode: SourceMode::Raw,
            seed: None,
        }
    }

    /// Options for pre-processed, pre-balanced sources.
    #[must_use]
    pub fn processed() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Loads a single collection in record schema.
///
/// Raw sources are projected to the whitelisted columns before parsing and
/// read as text; values that are not valid for a field's kind become null.
pub fn load_collection(path: &Path, mode: SourceMode) -> Result<DataFrame> {
    let mut df = match mode {
        SourceMode::Raw => {
            let header = read_csv_header(path)?;
            let columns = resolve_raw_columns(&header, path)?;
            let names: Vec<String> = columns
                .iter()
                .map(|column| column.header.clone())
                .collect();
            let mut df = read_csv_text_columns(path, &names)?;
            rename_raw_columns(&mut df, &columns)?;
            df
        }
        SourceMode::Processed => read_csv_frame(path)?,
    };
    harmonise_dtypes(&mut df)?;
    Ok(df)
}

/// Loads both sources and produces the balanced dataset.
///
/// In raw mode the collections are balanced immediately; in processed mode
/// they are taken as already balanced.
pub fn load(
    case_source: &Path,
    control_source: &Path,
    options: &LoadOptions,
) -> Result<BalancedDataset> {
    let span = info_span!(
        "load",
        case = %case_source.display(),
        control = %control_source.display(),
        mode = ?options.mode
    );
    let _guard = span.enter();

    let case = load_collection(case_source, options.mode)?;
    let control = load_collection(control_source, options.mode)?;
    info!(
        case_rows = case.height(),
        control_rows = control.height(),
        "loaded sources"
    );

    match options.mode {
        SourceMode::Raw => balance(&case, &control, options.seed),
        SourceMode::Processed => {
            check_same_columns(&case, case_source, &control, control_source)?;
            Ok(BalancedDataset::new(case, control))
        }
    }
}

/// Writes both collections of a dataset as CSV files.
pub fn write_dataset(
    dataset: &BalancedDataset,
    case_path: &Path,
    control_path: &Path,
) -> Result<()> {
    let mut case = dataset.case().clone();
    let mut control = dataset.control().clone();
    write_csv_frame(&mut case, case_path)?;
    write_csv_frame(&mut control, control_path)?;
    info!(
        case = %case_path.display(),
        control = %control_path.display(),
        "wrote balanced dataset"
    );
    Ok(())
}
