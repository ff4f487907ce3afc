use thiserror::Error;

/// Error type for invalid operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeCarbonError {
    /// The species name is not registered. Lookups are exact-key only.
    #[error("Species '{species}' not found in registry")]
    NotFound { species: String },
    /// Invalid planting input, such as a non-positive quantity or a malformed date.
    #[error("Invalid input: {0}")]
    Validation(String),
    /// Species traits or model parameters outside their domain.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl TreeCarbonError {
    pub fn not_found(species: impl Into<String>) -> Self {
        Self::NotFound {
            species: species.into(),
        }
    }
}

/// Convenience type for `Result<T, TreeCarbonError>`.
pub type TreeCarbonResult<T> = Result<T, TreeCarbonError>;
