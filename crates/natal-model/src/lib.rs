//! Data model for case-control natality comparison.
//!
//! - **field**: the record schema and the raw-to-friendly column mapping
//! - **feature** / **condition**: the fixed enumerations callers may select from
//! - **group**: labels attached to rows inside transform outputs
//! - **sentinel**: reserved "unknown" values and their predicates
//! - **dataset**: the immutable balanced snapshot

pub mod condition;
pub mod dataset;
pub mod error;
pub mod feature;
pub mod field;
pub mod group;
pub mod sentinel;

pub use condition::Condition;
pub use dataset::BalancedDataset;
pub use error::{ModelError, Result};
pub use feature::{Feature, FeatureOption};
pub use field::{Field, FieldKind};
pub use group::{GROUP_COLUMN, GroupLabel, Trimester};
pub use sentinel::{
    INVALID_FATHER_AGE, UNKNOWN_CIGARETTE_COUNT, is_known_cigarette_count, is_valid_father_age,
};
