//! Error handling utilities for repositories

use blog_core::error::DomainError;
use sqlx::Error as SqlxError;

/// SQLSTATE for a serialization failure
const SERIALIZATION_FAILURE: &str = "40001";
/// SQLSTATE for a detected deadlock
const DEADLOCK_DETECTED: &str = "40P01";

/// Convert SQLx error to DomainError
///
/// Serialization failures and deadlocks become `WriteConflict` so the
/// transaction coordinator can retry them. A counter CHECK violation means
/// a decrement would have gone below zero.
pub fn map_db_error(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if matches!(
            db_err.code().as_deref(),
            Some(SERIALIZATION_FAILURE | DEADLOCK_DETECTED)
        ) {
            return DomainError::WriteConflict;
        }
        if db_err.is_check_violation() {
            return DomainError::CounterUnderflow("counter");
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

/// A foreign key violation means the parent row vanished under us
pub fn map_missing_parent<F>(e: SqlxError, on_missing: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_missing();
        }
    }
    map_db_error(e)
}
