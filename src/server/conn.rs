//! Per-connection request processing.
//!
//! One [`Connection`] exclusively owns one accepted socket's two halves for
//! exactly one request: read and validate the head, dispatch on the method,
//! write the response, then release every resource exactly once. No state
//! is shared with any other connection apart from the read-only MIME table.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::parser::{read_request, Incoming, Method, Request};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler::PostSink;
use crate::server::mime::MimeTable;
use crate::server::resource::{resolve, Resolution};
use crate::server::response::{error_page, ResponseHead, StatusCode, UNKNOWN};

/// Fixed body answering the BREW method, in the spirit of RFC 2324.
const TEAPOT_BODY: &str = "I'm a teapot, short and stout. This server brews no coffee.\r\n";

/// Handles one accepted connection.
///
/// The reader and writer are `Option` so that never-opened and
/// already-closed look the same to [`Connection::teardown`], which makes
/// the teardown idempotent by construction.
pub struct Connection<R, W> {
    reader: Option<BufReader<R>>,
    writer: Option<W>,
    peer: Option<SocketAddr>,
    root: PathBuf,
    chunk_size: usize,
    mime: Arc<MimeTable>,
    post_sink: PostSink,
}

impl<R, W> Connection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Take ownership of one connection's read and write halves.
    pub fn new(
        read: R,
        write: W,
        peer: Option<SocketAddr>,
        config: &ServerConfig,
        mime: Arc<MimeTable>,
        post_sink: PostSink,
    ) -> Self {
        Self {
            reader: Some(BufReader::new(read)),
            writer: Some(write),
            peer,
            root: config.root.clone(),
            chunk_size: config.chunk_size,
            mime,
            post_sink,
        }
    }

    /// Serve exactly one request, then tear the connection down.
    ///
    /// Every outcome, including an abandoned request, ends in
    /// [`Connection::teardown`].
    pub async fn serve(mut self) {
        if let Err(e) = self.process().await {
            warn!("request from {} abandoned: {e}", self.peer_label());
        }
        self.teardown().await;
    }

    async fn process(&mut self) -> Result<(), Error> {
        let incoming = {
            let Some(reader) = self.reader.as_mut() else {
                return Ok(());
            };
            read_request(reader).await?
        };

        match incoming {
            Incoming::Request(request) => self.dispatch(request).await,
            Incoming::Malformed { line, headers } => {
                debug!("malformed request line from {}: {line:?}", self.peer_label());
                self.respond_error(StatusCode::BadRequest, headers.get("User-Agent"), true)
                    .await
            }
        }
    }

    /// Method dispatch: a case-sensitive exact match on the method token.
    async fn dispatch(&mut self, request: Request) -> Result<(), Error> {
        info!(
            "{} {} {} from {}",
            request.method,
            request.target,
            request.version,
            self.peer_label()
        );

        match request.method.parse::<Method>() {
            Ok(Method::GET) => self.respond_file(&request, true).await,
            Ok(Method::HEAD) => self.respond_file(&request, false).await,
            Ok(Method::POST) => self.respond_post(&request).await,
            Ok(Method::BREW) => self.respond_teapot().await,
            Err(_) => {
                self.respond_error(StatusCode::NotImplemented, request.user_agent(), true)
                    .await
            }
        }
    }

    /// Answer GET and HEAD. `send_body` is false for HEAD, which gets the
    /// identical head with no body on every outcome.
    async fn respond_file(&mut self, request: &Request, send_body: bool) -> Result<(), Error> {
        match resolve(&self.root, &request.target, &self.mime).await {
            Resolution::Found { path, content_type } => {
                let head = ResponseHead::new(StatusCode::Ok).with_content_type(content_type);
                if !send_body {
                    return self.send(&head.to_bytes()).await;
                }

                // Open before the first byte goes out: a file that vanished
                // since the existence check must abort the response rather
                // than truncate it.
                let mut file = match tokio::fs::File::open(&path).await {
                    Ok(file) => file,
                    Err(e) => {
                        error!("{} resolved but failed to open: {e}", path.display());
                        return Ok(());
                    }
                };

                let Some(writer) = self.writer.as_mut() else {
                    return Ok(());
                };
                writer.write_all(&head.to_bytes()).await?;

                let mut chunk = vec![0u8; self.chunk_size];
                loop {
                    let n = file.read(&mut chunk).await?;
                    if n == 0 {
                        break;
                    }
                    writer.write_all(&chunk[..n]).await?;
                }
                writer.flush().await?;
                Ok(())
            }
            Resolution::NotFound => {
                self.respond_error(StatusCode::NotFound, request.user_agent(), send_body)
                    .await
            }
            Resolution::Forbidden => {
                self.respond_error(StatusCode::Forbidden, request.user_agent(), send_body)
                    .await
            }
        }
    }

    /// Answer POST: count `Content-Length` body bytes off the stream and
    /// hand them to the post sink.
    async fn respond_post(&mut self, request: &Request) -> Result<(), Error> {
        let length = match request.headers.get("Content-Length").map(str::parse::<usize>) {
            Some(Ok(length)) => length,
            // Absent, negative, or non-numeric
            _ => {
                return self
                    .respond_error(StatusCode::BadRequest, request.user_agent(), true)
                    .await;
            }
        };

        if request.lossy {
            // The head needed lossy decoding, so a byte-exact body read
            // cannot be trusted.
            return self
                .respond_error(StatusCode::InternalServerError, request.user_agent(), true)
                .await;
        }

        let mut body = vec![0u8; length];
        {
            let Some(reader) = self.reader.as_mut() else {
                return Ok(());
            };
            if let Err(e) = reader.read_exact(&mut body).await {
                warn!("POST body ended short of {length} bytes: {e}");
                return self
                    .respond_error(StatusCode::InternalServerError, request.user_agent(), true)
                    .await;
            }
        }

        let body = match String::from_utf8(body) {
            Ok(body) => body,
            Err(_) => {
                return self
                    .respond_error(StatusCode::InternalServerError, request.user_agent(), true)
                    .await;
            }
        };

        (self.post_sink)(&body);
        self.send(&ResponseHead::new(StatusCode::Ok).to_bytes()).await
    }

    /// Answer BREW, unconditionally.
    async fn respond_teapot(&mut self) -> Result<(), Error> {
        let head = ResponseHead::new(StatusCode::ImATeapot).with_content_type("text/plain");
        let mut bytes = head.to_bytes();
        bytes.extend_from_slice(TEAPOT_BODY.as_bytes());
        self.send(&bytes).await
    }

    /// Send a 4xx/5xx head and, unless suppressed for HEAD, the generated
    /// error page naming the client and its User-Agent.
    async fn respond_error(
        &mut self,
        status: StatusCode,
        user_agent: Option<&str>,
        send_body: bool,
    ) -> Result<(), Error> {
        let head = ResponseHead::new(status).with_content_type("text/html");
        let mut bytes = head.to_bytes();
        if send_body {
            bytes.extend_from_slice(error_page(status, self.peer, user_agent).as_bytes());
        }
        self.send(&bytes).await
    }

    /// Write and flush one complete response.
    async fn send(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        writer.write_all(bytes).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Release the connection's resources.
    ///
    /// Runs on every exit path and tolerates repeated invocation and
    /// resources that never opened: each step is guarded by its own
    /// already-closed check. Input side first, then flush and shut down the
    /// output side; with both halves released the socket itself closes.
    /// Failures are non-fatal anomalies, summarised in a single warning.
    pub async fn teardown(&mut self) {
        let mut anomalies = 0u32;

        // Input side: dropping the buffered reader releases the read half.
        if let Some(reader) = self.reader.take() {
            drop(reader);
        }

        // Output side: flush whatever is buffered, then shut the write
        // half down so the peer sees an orderly close.
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush().await {
                warn!("flush during teardown of {} failed: {e}", self.peer_label());
                anomalies += 1;
            }
            if let Err(e) = writer.shutdown().await {
                warn!("output shutdown for {} failed: {e}", self.peer_label());
                anomalies += 1;
            }
        }

        if anomalies > 0 {
            warn!(
                "connection to {} was not torn down cleanly ({anomalies} close failures); \
                 restart the server if sockets are leaking",
                self.peer_label()
            );
        }
    }

    fn peer_label(&self) -> String {
        self.peer
            .map_or_else(|| UNKNOWN.to_string(), |peer| peer.to_string())
    }
}
