//! Error types for the todos API client

use thiserror::Error;

/// Errors that can occur when talking to the remote todos collection
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing `TODO_API_URL` environment variable
    #[error("Missing TODO_API_URL environment variable")]
    MissingBaseUrl,

    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Response parsing failed: {0}")]
    ParseFailed(String),

    /// The record does not exist on the server
    #[error("Record not found")]
    NotFound,

    /// The server rejected the payload
    #[error("Validation rejected (status {status}): {message}")]
    Validation {
        /// HTTP status code
        status: u16,
        /// Error message from the server
        message: String,
    },

    /// Server returned an unexpected error status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the server
        message: String,
    },
}
