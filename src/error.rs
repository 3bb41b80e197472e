//! Error types for the registry.
//!
//! Provides standardized error handling across the crate.

use thiserror::Error;

/// Errors surfaced by the registry and its preference backends.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An operation referenced an engine identity not present in the catalog.
    #[error("unknown engine: {name}")]
    UnknownEngine { name: String },

    /// `set_ordered_engines` was called with a sequence that is not a
    /// permutation of the current engine set.
    #[error("invalid engine order: {0}")]
    InvalidOrder(String),

    /// The preference store failed to read or write. The registry's
    /// in-memory state is not rolled back; memory and disk may disagree.
    #[error("preference store error: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RegistryError {
    /// Wrap a store-level failure.
    pub fn persistence<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RegistryError::Persistence(Box::new(err))
    }
}

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
