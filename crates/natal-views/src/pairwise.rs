//! Two-feature joint distribution comparison.

use polars::prelude::DataFrame;
use tracing::debug;

use natal_model::{BalancedDataset, Feature};

use crate::error::Result;
use crate::frame::labeled_projection;

/// Projects two permitted features from both collections.
///
/// Output columns are `[<a>, <b>, group]`, case rows first. When both names
/// are the same feature the pairing is degenerate and the frame carries the
/// column once: `[<a>, group]`.
pub fn prepare_pairwise(
    dataset: &BalancedDataset,
    feature_a: &str,
    feature_b: &str,
) -> Result<DataFrame> {
    let a: Feature = feature_a.parse()?;
    let b: Feature = feature_b.parse()?;
    let df = if a == b {
        labeled_projection(dataset, &[a.name()])?
    } else {
        labeled_projection(dataset, &[a.name(), b.name()])?
    };
    debug!(
        feature_a = %a,
        feature_b = %b,
        rows = df.height(),
        "prepared pairwise view"
    );
    Ok(df)
}
