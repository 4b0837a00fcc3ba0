use thiserror::Error;

/// Errors raised when a caller names something outside the fixed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Not one of the permitted univariate/pairwise features.
    #[error("unknown feature '{name}'")]
    UnknownFeature { name: String },

    /// Not one of the permitted categorical condition fields.
    #[error("unknown condition field '{name}'")]
    UnknownField { name: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
