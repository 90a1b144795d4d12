//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed on `{field}`: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i64 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    #[error("Storage delete failed: {0}")]
    StorageDelete(String),

    #[error("Persistence failed: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(entity_type: &'static str, id: i64) -> Self {
        Self::NotFound { entity_type, id }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Conflict(msg),
            other => DomainError::Persistence(other.to_string()),
        }
    }
}

/// Asset store errors.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to write asset: {0}")]
    Write(String),

    #[error("Failed to delete asset {name}: {reason}")]
    Delete { name: String, reason: String },

    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Invalid asset name: {0}")]
    InvalidName(String),
}

impl From<AssetError> for DomainError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::Delete { .. } => DomainError::StorageDelete(err.to_string()),
            other => DomainError::StorageWrite(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_errors_map_to_storage_errors() {
        let write: DomainError = AssetError::Write("disk full".into()).into();
        assert!(matches!(write, DomainError::StorageWrite(ref m) if m.contains("disk full")));

        let delete: DomainError = AssetError::Delete {
            name: "a.png".into(),
            reason: "busy".into(),
        }
        .into();
        assert!(matches!(delete, DomainError::StorageDelete(ref m) if m.contains("a.png")));
    }

    #[test]
    fn test_constraint_violation_is_conflict() {
        let err: DomainError = RepoError::Constraint("fk".into()).into();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
