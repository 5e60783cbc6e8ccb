use crate::dependencies::DependencyCount;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Validation failure carrying a structured payload (offending fields, counts).
    #[error("Validation failed: {message}")]
    InvalidInput {
        message: String,
        details: serde_json::Value,
    },

    /// Deactivation or deletion blocked by referencing rows.
    #[error("{entity} has active dependencies")]
    HasDependencies {
        entity: &'static str,
        dependencies: Vec<DependencyCount>,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for an [`CoreError::InvalidInput`] with a JSON details payload.
    pub fn invalid(message: impl Into<String>, details: serde_json::Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }
}
