//! Application error handling
//!
//! This module provides the error types for the storage layer, the state
//! stores built on top of it, and the remote completion client. Each
//! surface gets its own enum so callers can match on exactly the failures
//! that surface can produce.

use thiserror::Error;

/// Errors raised by the key-value storage layer
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by wellness store reads and mutations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error")]
    Storage(#[from] StorageError),

    #[error("Serialization error")]
    Serialize(#[from] serde_json::Error),
}

/// Errors raised by sign-in, sign-out, and profile updates
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Sign-in failed: {0}")]
    Provider(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error")]
    Storage(#[from] StorageError),

    #[error("Serialization error")]
    Serialize(#[from] serde_json::Error),
}

/// Errors raised by the remote completion client
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Completion request failed")]
    Network(#[from] reqwest::Error),

    #[error("Completion endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed completion response")]
    Malformed(#[from] serde_json::Error),
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for wellness store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for auth store operations
pub type AuthResult<T> = Result<T, AuthError>;
