//! The balanced case/control snapshot shared by every view.

use polars::prelude::DataFrame;

use crate::group::GroupLabel;

/// Filtered case records and sampled control records.
///
/// Built once per run and never mutated afterwards, so a single value can
/// be shared (for example behind an `Arc`) by any number of concurrent
/// transform calls.
#[derive(Debug, Clone)]
pub struct BalancedDataset {
    case: DataFrame,
    control: DataFrame,
}

impl BalancedDataset {
    pub fn new(case: DataFrame, control: DataFrame) -> Self {
        Self { case, control }
    }

    pub fn case(&self) -> &DataFrame {
        &self.case
    }

    pub fn control(&self) -> &DataFrame {
        &self.control
    }

    /// Both collections, case first.
    pub fn groups(&self) -> [(GroupLabel, &DataFrame); 2] {
        [
            (GroupLabel::Case, &self.case),
            (GroupLabel::Control, &self.control),
        ]
    }

    pub fn case_count(&self) -> usize {
        self.case.height()
    }

    pub fn control_count(&self) -> usize {
        self.control.height()
    }
}
