//! Error types for the HTTP server.

use thiserror::Error;

use crate::parser::Error as ParserError;

/// Errors that can occur during HTTP server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Error reading a request head.
    #[error("parse error: {0}")]
    Parse(#[from] ParserError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A MIME table source contained nothing usable.
    #[error("no usable entries in MIME table {0}")]
    EmptyMimeTable(String),
}
