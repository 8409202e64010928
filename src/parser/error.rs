//! Error types for the HTTP parser.

use thiserror::Error;

/// Errors that can occur while reading a request head from a connection.
#[derive(Debug, Error)]
pub enum Error {
    /// The connection ended before a complete request head arrived.
    #[error("connection closed before a complete request head arrived")]
    TruncatedHead,

    /// The HTTP method in the request is not one this server implements.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// I/O error while reading from the connection.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
