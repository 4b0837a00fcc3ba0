//! View transforms over the balanced case-control dataset.
//!
//! Each transform is a pure read of a shared
//! [`BalancedDataset`](natal_model::BalancedDataset) and has its own inputs
//! and outputs:
//!
//! - **univariate**: one feature, labeled by group
//! - **pairwise**: two features, labeled by group
//! - **repeated**: trimester cigarette counts reshaped to long form
//! - **crosstab**: condition combinations with per-group counts
//!
//! Feature and condition names are validated against the fixed
//! enumerations in `natal-model`; an unknown name fails only that call.

pub mod crosstab;
pub mod error;
pub mod frame;
pub mod pairwise;
pub mod repeated;
pub mod univariate;

pub use crosstab::{CellValue, ColumnDescriptor, CrossTab, TableRow, prepare_crosstab};
pub use error::{Result, ViewError};
pub use frame::records;
pub use pairwise::prepare_pairwise;
pub use repeated::{PERIOD_COLUMN, VALUE_COLUMN, prepare_cigarettes};
pub use univariate::prepare_univariate;
