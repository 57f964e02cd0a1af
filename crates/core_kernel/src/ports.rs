//! Port contracts for storage and lookup collaborators
//!
//! Each domain defines its own port traits (product catalog, order store,
//! journal store, ...) that depend only on this crate. Adapters implement
//! them over whatever storage technology sits behind the core.
//!
//! Every operation in the core is computed synchronously and either
//! returns a result or signals an error immediately, so port traits are
//! synchronous as well; a save is a blocking handoff that returns success
//! or failure.

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// Provides a unified error type that all port implementations use,
/// so domain errors stay uniform no matter which adapter is plugged in.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The underlying store rejected or lost the write
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        PortError::Storage {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all repository-style ports
///
/// Repositories are owned by a single mutator at a time; implementations
/// must be `Send` so an aggregate and its collaborators can move between
/// threads together.
pub trait Repository: Send {}
