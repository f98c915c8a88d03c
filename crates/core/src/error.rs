use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The acting user does not own the record they tried to mutate.
    #[error("{entity} with id {id} is not owned by user with id {user_id}")]
    NotOwner {
        entity: &'static str,
        id: DbId,
        owner_id: DbId,
        user_id: DbId,
    },
}

impl CoreError {
    /// `NotFound` keyed by primary key.
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound {
            entity,
            key: format!("id {id}"),
        }
    }

    /// `NotFound` keyed by an arbitrary lookup field (e.g. a login identifier).
    pub fn not_found_by(entity: &'static str, field: &str, value: &str) -> Self {
        CoreError::NotFound {
            entity,
            key: format!("{field} {value}"),
        }
    }
}
