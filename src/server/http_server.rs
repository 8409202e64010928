//! HTTP server implementation.

use std::sync::Arc;

use log::{info, warn};
use tokio::net::TcpListener;
use tokio::signal;

use crate::server::config::ServerConfig;
use crate::server::conn::Connection;
use crate::server::error::Error;
use crate::server::handler::{default_post_sink, PostSink};
use crate::server::mime::MimeTable;

/// An HTTP/1.0 file server.
///
/// The server owns what every connection shares (configuration, the
/// read-only MIME table, the POST sink) and spawns one task per accepted
/// connection. Request bytes are never touched on the accept loop.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    mime: Arc<MimeTable>,
    post_sink: PostSink,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and MIME table.
    pub fn new(config: ServerConfig, mime: MimeTable) -> Self {
        Self {
            config,
            mime: Arc::new(mime),
            post_sink: default_post_sink(),
        }
    }

    /// Replace the sink that receives POST bodies.
    pub fn with_post_sink(mut self, post_sink: PostSink) -> Self {
        self.post_sink = post_sink;
        self
    }

    /// Bind the listening socket and serve until Ctrl+C.
    ///
    /// A bind failure is fatal and returned to the caller. Accept failures
    /// are logged and retried after a short pause; a connection's failure
    /// stays inside its own task and never stops the loop.
    pub async fn start(&self) -> Result<(), Error> {
        let listener = TcpListener::bind(self.config.addr).await?;
        info!(
            "Serving {} on http://{addr}",
            self.config.root.display(),
            addr = self.config.addr
        );

        loop {
            tokio::select! {
                _ = signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, peer)) => {
                            info!("Accepted connection from {peer}");
                            let (read, write) = socket.into_split();
                            let conn = Connection::new(
                                read,
                                write,
                                Some(peer),
                                &self.config,
                                self.mime.clone(),
                                self.post_sink.clone(),
                            );
                            tokio::spawn(conn.serve());
                        }
                        Err(e) => {
                            // Transient accept errors must not end the loop.
                            warn!("Error accepting connection: {e}");
                            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
