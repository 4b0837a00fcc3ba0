//! Single-feature distribution comparison.

use polars::prelude::DataFrame;
use tracing::debug;

use natal_model::{BalancedDataset, Feature};

use crate::error::Result;
use crate::frame::labeled_projection;

/// Projects one permitted feature from both collections.
///
/// Output columns are `[<feature>, group]`, case rows first.
pub fn prepare_univariate(dataset: &BalancedDataset, feature: &str) -> Result<DataFrame> {
    let feature: Feature = feature.parse()?;
    let df = labeled_projection(dataset, &[feature.name()])?;
    debug!(feature = %feature, rows = df.height(), "prepared univariate view");
    Ok(df)
}
