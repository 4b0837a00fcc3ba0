//! Error types for the view transforms.

use natal_model::ModelError;
use thiserror::Error;

/// Errors local to a single transform call.
///
/// None of these can leave the shared dataset in a different state: the
/// transforms only ever read from it.
#[derive(Debug, Error)]
pub enum ViewError {
    /// The caller named a feature or condition outside the enumerations.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ViewError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewError>;
