//! Case-control balancing.
//!
//! Draws an equally sized random subset of eligible controls, then applies
//! the father-age outlier rule to both collections.

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray, UInt32Chunked};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use serde::Serialize;
use tracing::info;

use natal_model::{BalancedDataset, Field, is_valid_father_age};

use crate::error::{IngestError, Result};

/// Row counts observed at each balancing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceReport {
    pub case_in: usize,
    pub control_pool: usize,
    pub eligible_controls: usize,
    pub sampled_controls: usize,
    pub case_out: usize,
    pub control_out: usize,
}

/// Balances a case collection against a control pool.
///
/// The age filter runs after sampling and independently on each side, so
/// the two output sizes can differ even though sampling matched them.
pub fn balance(
    case: &DataFrame,
    control_pool: &DataFrame,
    seed: Option<u64>,
) -> Result<BalancedDataset> {
    balance_with_report(case, control_pool, seed).map(|(dataset, _)| dataset)
}

/// Same as [`balance`], also returning the per-step counts.
pub fn balance_with_report(
    case: &DataFrame,
    control_pool: &DataFrame,
    seed: Option<u64>,
) -> Result<(BalancedDataset, BalanceReport)> {
    let eligible = eligible_controls(control_pool)?;
    let sampled = sample_controls(&eligible, case.height(), seed)?;

    let filtered_case = filter_father_age(case)?;
    let filtered_control = filter_father_age(&sampled)?;

    let report = BalanceReport {
        case_in: case.height(),
        control_pool: control_pool.height(),
        eligible_controls: eligible.height(),
        sampled_controls: sampled.height(),
        case_out: filtered_case.height(),
        control_out: filtered_control.height(),
    };
    info!(
        case_in = report.case_in,
        control_pool = report.control_pool,
        eligible_controls = report.eligible_controls,
        sampled_controls = report.sampled_controls,
        case_out = report.case_out,
        control_out = report.control_out,
        seeded = seed.is_some(),
        "balanced case and control collections"
    );
    Ok((BalancedDataset::new(filtered_case, filtered_control), report))
}

/// Keeps control records that carry no case identifier.
pub fn eligible_controls(control_pool: &DataFrame) -> Result<DataFrame> {
    let id = control_pool
        .column(Field::Id.name())
        .map_err(|_| IngestError::ColumnNotFound {
            column: Field::Id.name().to_string(),
        })?;
    let mask = id.as_materialized_series().is_null();
    Ok(control_pool.filter(&mask)?)
}

/// Draws `count` rows uniformly at random without replacement.
///
/// With a seed the draw is reproducible; without one the generator is
/// seeded from the operating system.
pub fn sample_controls(
    eligible: &DataFrame,
    count: usize,
    seed: Option<u64>,
) -> Result<DataFrame> {
    let available = eligible.height();
    if available < count {
        return Err(IngestError::InsufficientControls {
            required: count,
            available,
        });
    }
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let indices: Vec<u32> = index::sample(&mut rng, available, count)
        .iter()
        .map(|idx| idx as u32)
        .collect();
    let idx = UInt32Chunked::from_vec("idx".into(), indices);
    Ok(eligible.take(&idx)?)
}

/// Drops records whose father age is missing or at/above the invalid-age
/// sentinel.
pub fn filter_father_age(df: &DataFrame) -> Result<DataFrame> {
    let ages = df
        .column(Field::FatherAge.name())
        .map_err(|_| IngestError::ColumnNotFound {
            column: Field::FatherAge.name().to_string(),
        })?
        .i64()?;
    let keep: Vec<bool> = ages.into_iter().map(is_valid_father_age).collect();
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    Ok(df.filter(&mask)?)
}
