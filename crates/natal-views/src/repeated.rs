//! Wide-to-long reshaping of the trimester cigarette counts.
//!
//! Each record holds three repeated measurements of the same quantity.
//! Records with an unknown count in any trimester are dropped as a whole;
//! every surviving record contributes one row per trimester.

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use tracing::debug;

use natal_model::{BalancedDataset, GROUP_COLUMN, Trimester, is_known_cigarette_count};

use crate::error::Result;

/// Period label column of the long-form output.
pub const PERIOD_COLUMN: &str = "period";

/// Measurement column of the long-form output.
pub const VALUE_COLUMN: &str = "value";

/// Reshapes the trimester counts of both collections into long form.
///
/// Output columns are `[period, value, group]`. Rows are appended per
/// collection (case first) and, within a collection, trimester by trimester
/// in record order.
///
/// With `use_log_scale` every value is replaced by its base-10 logarithm.
/// A zero count maps to negative infinity rather than NaN; negative counts
/// never reach this point because the sentinel filter rejects them.
pub fn prepare_cigarettes(dataset: &BalancedDataset, use_log_scale: bool) -> Result<DataFrame> {
    let mut periods: Vec<&'static str> = Vec::new();
    let mut values: Vec<f64> = Vec::new();
    let mut groups: Vec<&'static str> = Vec::new();

    for (group, df) in dataset.groups() {
        let counts = trimester_counts(df)?;
        let records: Vec<[i64; 3]> = (0..df.height())
            .filter_map(|row| known_counts(&counts, row))
            .collect();
        debug!(
            group = %group,
            records = df.height(),
            kept = records.len(),
            "filtered unknown cigarette counts"
        );
        for (idx, trimester) in Trimester::ALL.iter().enumerate() {
            for record in &records {
                periods.push(trimester.as_str());
                values.push(scale(record[idx], use_log_scale));
                groups.push(group.as_str());
            }
        }
    }

    let df = DataFrame::new(vec![
        Series::new(PERIOD_COLUMN.into(), periods).into_column(),
        Series::new(VALUE_COLUMN.into(), values).into_column(),
        Series::new(GROUP_COLUMN.into(), groups).into_column(),
    ])?;
    Ok(df)
}

fn trimester_counts(df: &DataFrame) -> Result<Vec<Vec<Option<i64>>>> {
    let mut counts = Vec::with_capacity(Trimester::ALL.len());
    for trimester in Trimester::ALL {
        let column = df.column(trimester.field().name())?.i64()?;
        counts.push(column.into_iter().collect());
    }
    Ok(counts)
}

/// The three counts of `row`, or `None` when any of them is unknown.
fn known_counts(counts: &[Vec<Option<i64>>], row: usize) -> Option<[i64; 3]> {
    let mut known = [0; 3];
    for (slot, column) in known.iter_mut().zip(counts) {
        *slot = column[row].filter(|&count| is_known_cigarette_count(Some(count)))?;
    }
    Some(known)
}

fn scale(count: i64, use_log_scale: bool) -> f64 {
    let value = count as f64;
    if use_log_scale {
        value.log10()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_counts() {
        let counts = vec![
            vec![Some(5), Some(1), Some(0)],
            vec![Some(8), None, Some(99)],
            vec![Some(150), Some(3), Some(-1)],
        ];
        assert_eq!(known_counts(&counts, 0), None);
        assert_eq!(known_counts(&counts, 1), None);
        assert_eq!(known_counts(&counts, 2), None);
        let counts = vec![vec![Some(0)], vec![Some(99)], vec![Some(4)]];
        assert_eq!(known_counts(&counts, 0), Some([0, 99, 4]));
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale(10, false), 10.0);
        assert!((scale(100, true) - 2.0).abs() < 1e-12);
        assert_eq!(scale(0, true), f64::NEG_INFINITY);
    }
}
