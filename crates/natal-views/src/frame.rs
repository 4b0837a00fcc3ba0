//! DataFrame helpers shared by the transforms.

use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};
use serde_json::{Map, Value};

use natal_model::{BalancedDataset, GROUP_COLUMN, GroupLabel};

use crate::error::Result;

/// A `group` column repeating one label.
pub(crate) fn group_column(group: GroupLabel, len: usize) -> Column {
    Series::new(GROUP_COLUMN.into(), vec![group.as_str(); len]).into_column()
}

/// Projects `columns` from both collections, tags each row with its group,
/// and stacks case rows above control rows.
pub(crate) fn labeled_projection(
    dataset: &BalancedDataset,
    columns: &[&str],
) -> Result<DataFrame> {
    let mut combined: Option<DataFrame> = None;
    for (group, df) in dataset.groups() {
        let mut part = df.select(columns.iter().copied())?;
        let height = part.height();
        part.with_column(group_column(group, height))?;
        match combined.as_mut() {
            Some(acc) => {
                acc.vstack_mut(&part)?;
            }
            None => combined = Some(part),
        }
    }
    // groups() always yields two collections.
    Ok(combined.unwrap_or_default())
}

/// Converts a frame into row maps keyed by column name.
///
/// Non-finite floats become JSON `null`.
pub fn records(df: &DataFrame) -> Result<Vec<Map<String, Value>>> {
    let columns = df.get_columns();
    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut row = Map::new();
        for column in columns {
            row.insert(column.name().to_string(), any_to_json(column.get(idx)?));
        }
        rows.push(row);
    }
    Ok(rows)
}

fn any_to_json(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::Int8(v) => Value::from(v),
        AnyValue::Int16(v) => Value::from(v),
        AnyValue::Int32(v) => Value::from(v),
        AnyValue::Int64(v) => Value::from(v),
        AnyValue::UInt8(v) => Value::from(v),
        AnyValue::UInt16(v) => Value::from(v),
        AnyValue::UInt32(v) => Value::from(v),
        AnyValue::UInt64(v) => Value::from(v),
        AnyValue::Float32(v) => Value::from(f64::from(v)),
        AnyValue::Float64(v) => Value::from(v),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        other => Value::String(other.to_string()),
    }
}
