//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{BlogId, CommentId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Blog not found: {0}")]
    BlogNotFound(BlogId),

    #[error("Comment not found: {0}")]
    CommentNotFound(CommentId),

    #[error("Reaction of user {0} not found")]
    ReactionNotFound(UserId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid reaction action: {0} (expected -1, 0 or 1)")]
    InvalidReactionAction(i64),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the owner of this reaction")]
    NotReactionOwner,

    #[error("Not the author of this {0}")]
    NotAuthor(&'static str),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    /// Concurrent write on the same (subject, user) pair; safe to retry
    #[error("Concurrent write conflict")]
    WriteConflict,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Counter {0} would become negative")]
    CounterUnderflow(&'static str),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Operation timed out after {0} ms")]
    Timeout(u64),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::BlogNotFound(_) => "UNKNOWN_BLOG",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::ReactionNotFound(_) => "UNKNOWN_REACTION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            Self::InvalidReactionAction(_) => "INVALID_REACTION_ACTION",

            // Authorization
            Self::NotReactionOwner => "NOT_REACTION_OWNER",
            Self::NotAuthor(_) => "NOT_AUTHOR",

            // Conflict
            Self::WriteConflict => "WRITE_CONFLICT",

            // Business Rules
            Self::CounterUnderflow(_) => "COUNTER_UNDERFLOW",

            // Infrastructure
            Self::Timeout(_) => "OPERATION_TIMEOUT",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BlogNotFound(_) | Self::CommentNotFound(_) | Self::ReactionNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidIdentifier(_) | Self::InvalidReactionAction(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotReactionOwner | Self::NotAuthor(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::WriteConflict)
    }

    /// Check if this is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Transient failures the transaction coordinator may retry
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::WriteConflict)
    }
}
