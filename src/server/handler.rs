//! The application seam for POST bodies.

use std::sync::Arc;

use log::info;

/// Receives every successfully read POST body.
///
/// The server itself only records bodies; anything smarter plugs in here
/// via [`crate::server::HttpServer::with_post_sink`].
pub type PostSink = Arc<dyn Fn(&str) + Send + Sync>;

/// The default sink logs the body and its size.
pub fn default_post_sink() -> PostSink {
    Arc::new(|body: &str| {
        info!("POST body received ({} bytes): {body}", body.len());
    })
}
