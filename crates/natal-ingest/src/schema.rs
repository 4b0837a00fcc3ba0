//! Record-schema shaping: raw column selection, renaming, dtype harmonisation.

use std::collections::BTreeSet;
use std::path::Path;

use polars::prelude::{DataFrame, DataType};

use natal_model::{Field, FieldKind};

use crate::error::{IngestError, Result};

/// A whitelisted raw column as it is spelled in a source header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColumn {
    pub header: String,
    pub field: Field,
}

/// Matches every record field to its raw column in `header`.
///
/// Header names are compared after trimming surrounding whitespace, but the
/// returned `header` keeps the exact spelling so that it can be used to
/// project the file. Fails with `SchemaMismatch` on the first field whose
/// raw column is absent.
pub fn resolve_raw_columns(header: &[String], path: &Path) -> Result<Vec<RawColumn>> {
    let mut resolved = Vec::with_capacity(Field::ALL.len());
    for field in Field::ALL {
        let Some(name) = header.iter().find(|name| name.trim() == field.raw_name()) else {
            return Err(IngestError::SchemaMismatch {
                column: field.raw_name().to_string(),
                path: path.to_path_buf(),
            });
        };
        resolved.push(RawColumn {
            header: name.clone(),
            field,
        });
    }
    Ok(resolved)
}

/// Renames projected raw columns to their record-schema names.
pub fn rename_raw_columns(df: &mut DataFrame, columns: &[RawColumn]) -> Result<()> {
    for column in columns {
        if column.header != column.field.name() {
            df.rename(&column.header, column.field.name().into())?;
        }
    }
    Ok(())
}

/// Casts every known record field present in `df` to its canonical dtype.
///
/// Casting is non-strict: values that do not parse become null, which the
/// sentinel filters downstream treat as unknown.
pub fn harmonise_dtypes(df: &mut DataFrame) -> Result<()> {
    let present: Vec<Field> = df
        .get_column_names()
        .iter()
        .filter_map(|name| Field::from_name(name.as_str()))
        .collect();
    for field in present {
        let dtype = match field.kind() {
            FieldKind::Integer => DataType::Int64,
            FieldKind::Text => DataType::String,
        };
        let column = df.column(field.name())?;
        if column.dtype() == &dtype {
            continue;
        }
        let cast = column.cast(&dtype)?;
        df.with_column(cast)?;
    }
    Ok(())
}

/// Fails with `SchemaMismatch` when `other` lacks a column of `reference`
/// or carries one `reference` does not have.
pub fn check_same_columns(
    reference: &DataFrame,
    reference_path: &Path,
    other: &DataFrame,
    other_path: &Path,
) -> Result<()> {
    let left: BTreeSet<String> = column_names(reference);
    let right: BTreeSet<String> = column_names(other);
    if let Some(column) = left.difference(&right).next() {
        return Err(IngestError::SchemaMismatch {
            column: column.clone(),
            path: other_path.to_path_buf(),
        });
    }
    if let Some(column) = right.difference(&left).next() {
        return Err(IngestError::SchemaMismatch {
            column: column.clone(),
            path: reference_path.to_path_buf(),
        });
    }
    Ok(())
}

fn column_names(df: &DataFrame) -> BTreeSet<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}
