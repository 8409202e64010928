//! A minimal HTTP/1.0 file server.
//!
//! This library serves one request per TCP connection with a focus on
//! simplicity, correctness, and strict resource teardown.
//!
//! # Features
//!
//! - One spawned task per accepted connection, nothing shared between
//!   connections but the read-only MIME table
//! - Streaming request-head parsing with last-write-wins header storage
//! - GET/HEAD answered from the filesystem below a configured root, with
//!   MIME types from a `mime.types`-style table
//! - POST bodies counted byte-exactly and handed to a pluggable sink
//! - The BREW method answered with `418 I'm a teapot`, everything unknown
//!   with `501 Not Implemented`
//! - Idempotent per-connection teardown that releases every stream and
//!   socket resource exactly once
//!
//! # Examples
//!
//! ## Parsing a request head
//!
//! ```
//! use minihttpd_rs::{read_request, Incoming};
//! use tokio::io::BufReader;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let head: &[u8] = b"GET /index.html HTTP/1.0\r\nUser-Agent: doc\r\n\r\n";
//! let mut reader = BufReader::new(head);
//!
//! match read_request(&mut reader).await.unwrap() {
//!     Incoming::Request(request) => {
//!         assert_eq!(request.method, "GET");
//!         assert_eq!(request.target, "/index.html");
//!         assert_eq!(request.user_agent(), Some("doc"));
//!     }
//!     Incoming::Malformed { line, .. } => panic!("malformed: {line}"),
//! }
//! # }
//! ```
//!
//! ## Running a server
//!
//! ```no_run
//! use minihttpd_rs::{HttpServer, MimeTable, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), minihttpd_rs::ServerError> {
//!     let mime = MimeTable::load(None).await;
//!     let server = HttpServer::new(ServerConfig::default(), mime);
//!     server.start().await
//! }
//! ```

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{read_request, Error as ParserError, Headers, Incoming, Method, Request};
pub use server::{
    error_page, Connection, Error as ServerError, HttpServer, MimeTable, PostSink, Resolution,
    ResponseHead, ServerConfig, StatusCode,
};
