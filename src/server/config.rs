//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// The directory served as the web root.
    pub root: PathBuf,
    /// The chunk size used when streaming file bodies.
    pub chunk_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:6789".parse().unwrap(),
            root: PathBuf::from("."),
            chunk_size: 1024,
        }
    }
}
