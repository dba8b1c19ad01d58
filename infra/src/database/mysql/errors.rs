//! Mapping of SQLx failures into domain errors

use auth_core::errors::DomainError;

/// Whether the error is a unique key violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

/// Log a store failure and turn it into `DomainError::Store`
pub(crate) fn store_error(context: &str, err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "{}", context);
    DomainError::Store {
        message: format!("{}: {}", context, err),
    }
}

/// A column that could not be decoded into the entity
pub(crate) fn decode_error(column: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to decode {}: {}", column, err),
    }
}
