//! CSV file access for case and control sources.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use polars::prelude::{CsvReadOptions, CsvWriter, DataFrame, PlSmallStr, SerReader, SerWriter};

use crate::error::{IngestError, Result};

/// Rows sampled for dtype inference.
const INFER_SCHEMA_ROWS: usize = 10_000;

fn unavailable(path: &Path, reason: impl ToString) -> IngestError {
    IngestError::SourceUnavailable {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Check that a source exists and is a regular file.
pub fn check_source(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            unavailable(path, "file not found")
        } else {
            unavailable(path, e)
        }
    })?;
    if !metadata.is_file() {
        return Err(unavailable(path, "not a regular file"));
    }
    Ok(())
}

/// Reads only the header row of a CSV source.
///
/// Names are returned as the frame readers will see them: a leading UTF-8
/// BOM is dropped, surrounding whitespace is kept.
pub fn read_csv_header(path: &Path) -> Result<Vec<String>> {
    check_source(path)?;
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| unavailable(path, e))?;
    let headers = reader.headers().map_err(|e| unavailable(path, e))?;
    let columns: Vec<String> = headers
        .iter()
        .map(|name| name.trim_start_matches('\u{feff}').to_string())
        .collect();
    if columns.iter().all(|name| name.trim().is_empty()) {
        return Err(unavailable(path, "no header row"));
    }
    Ok(columns)
}

/// Reads a whole CSV source into a DataFrame.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    check_source(path)?;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| unavailable(path, e))?
        .finish()
        .map_err(|e| unavailable(path, e))?;
    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read csv source"
    );
    Ok(df)
}

/// Reads only `columns` of a CSV source, every one as `String`.
///
/// Unselected columns are never type-inferred, so their content cannot
/// fail the read. Selected columns come back in the order given.
pub fn read_csv_text_columns(path: &Path, columns: &[String]) -> Result<DataFrame> {
    check_source(path)?;
    let projection: Arc<[PlSmallStr]> = columns
        .iter()
        .map(|name| PlSmallStr::from(name.as_str()))
        .collect();
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_columns(Some(projection))
        // Zero inference rows reads every column as text.
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| unavailable(path, e))?
        .finish()
        .map_err(|e| unavailable(path, e))?;
    let df = df.select(columns.iter().map(String::as_str))?;
    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read csv source as text"
    );
    Ok(df)
}

/// Writes a collection as CSV with a header row.
pub fn write_csv_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}
