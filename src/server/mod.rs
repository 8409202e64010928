//! HTTP/1.0 server implementation for minihttpd-rs.
//!
//! One request per connection: parse, dispatch on the method, respond from
//! the filesystem or generated content, tear everything down.

mod config;
mod conn;
mod error;
mod handler;
mod http_server;
mod mime;
mod resource;
mod response;

// Re-export public items
pub use config::ServerConfig;
pub use conn::Connection;
pub use error::Error;
pub use handler::{default_post_sink, PostSink};
pub use http_server::HttpServer;
pub use mime::{MimeTable, OCTET_STREAM};
pub use resource::{resolve, Resolution};
pub use response::{error_page, ResponseHead, StatusCode, UNKNOWN};
