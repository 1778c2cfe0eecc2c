//! Error types for the bookshelf toolkit.
//!
//! This module provides a unified error type with explicit variants for
//! transport, store, not-found, and input validation errors.

use std::fmt;
use thiserror::Error;

use crate::types::Key;

/// The unified error type for bookshelf operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Service-side errors reported by the store.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// No entity exists at the requested key.
    #[error("no entity found at key {key}")]
    NotFound {
        /// The key that was looked up.
        key: Key,
    },

    /// Input validation errors (invalid kind, id, cursor, store URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Construct a not-found error for the given key.
    pub fn not_found(key: Key) -> Self {
        Error::NotFound { key }
    }

    /// Check whether this error is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// DNS resolution failed.
    #[error("DNS resolution failed: {host}")]
    Dns { host: String },

    /// TLS/SSL error.
    #[error("TLS error: {message}")]
    Tls { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Service-side errors from store responses.
#[derive(Debug)]
pub struct StoreError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable status code from the service (if present).
    pub code: Option<String>,
    /// Error message from the service.
    pub message: Option<String>,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {}

impl StoreError {
    /// Create a new store error.
    pub fn new(status: u16, code: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    /// Check if the service reported the target entity as missing.
    pub fn is_not_found(&self) -> bool {
        self.status == 404 || self.code.as_deref() == Some("NOT_FOUND")
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid kind name.
    #[error("invalid kind '{value}': {reason}")]
    Kind { value: String, reason: String },

    /// Invalid entity id.
    #[error("invalid id '{value}': {reason}")]
    Id { value: String, reason: String },

    /// Malformed continuation token.
    #[error("invalid page token '{value}': {reason}")]
    Cursor { value: String, reason: String },

    /// Invalid store URL format.
    #[error("invalid store URL '{value}': {reason}")]
    StoreUrl { value: String, reason: String },

    /// An operation that requires an id was given a book without one.
    #[error("book has no id; only created books can be updated")]
    MissingId,

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
