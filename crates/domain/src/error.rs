//! Domain error types.

use common::{FeedbackId, ProductId};
use entity_store::StoreError;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A required field is missing or malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The id does not resolve to a live record.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    /// The write collides with an existing record.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Stored feedback points at a product that no longer resolves.
    #[error("Feedback {feedback_id} references unresolvable product {product_id}")]
    UnresolvedProduct {
        feedback_id: FeedbackId,
        product_id: ProductId,
    },

    /// An error occurred in the entity store.
    #[error("Entity store error: {0}")]
    Store(StoreError),
}

impl DomainError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<Uuid>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => DomainError::NotFound { entity, id },
            StoreError::UniqueViolation { entity, field } => {
                DomainError::Conflict(format!("a {entity} with this {field} already exists"))
            }
            other => DomainError::Store(other),
        }
    }
}

/// Rejects `value` if it has more than `max` characters.
pub(crate) fn check_length(field: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;
