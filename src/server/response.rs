//! HTTP response heads and generated error pages.

use std::fmt;
use std::net::SocketAddr;

/// HTTP status codes this server emits, with their standard reason phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok = 200,
    BadRequest = 400,
    Forbidden = 403,
    NotFound = 404,
    ImATeapot = 418,
    InternalServerError = 500,
    NotImplemented = 501,
}

impl StatusCode {
    /// Get the reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::ImATeapot => "I'm a teapot",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", *self as u16, self.reason_phrase())
    }
}

/// An HTTP/1.0 response head.
///
/// The wire format is fixed: the status line, an optional content-type
/// line, and the empty line that separates the head from any body. Nothing
/// else is ever sent. The POST success response is a head with no
/// content-type line at all.
#[derive(Debug, Clone)]
pub struct ResponseHead {
    /// The status code of the status line
    pub status: StatusCode,
    /// The value of the content-type line, when one is sent
    pub content_type: Option<String>,
}

impl ResponseHead {
    /// Create a response head with no content-type line.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
        }
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Serialise the head, including the terminating empty line.
    ///
    /// # Examples
    ///
    /// ```
    /// use minihttpd_rs::{ResponseHead, StatusCode};
    ///
    /// let head = ResponseHead::new(StatusCode::Ok).with_content_type("text/html");
    /// assert_eq!(head.to_bytes(), b"HTTP/1.0 200 OK\r\nContent-type: text/html\r\n\r\n");
    ///
    /// let bare = ResponseHead::new(StatusCode::Ok);
    /// assert_eq!(bare.to_bytes(), b"HTTP/1.0 200 OK\r\n\r\n");
    /// ```
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();

        // Add the status line
        let status_line = format!("HTTP/1.0 {}\r\n", self.status);
        bytes.extend_from_slice(status_line.as_bytes());

        // Add the content-type line, when the response carries one
        if let Some(content_type) = &self.content_type {
            let type_line = format!("Content-type: {content_type}\r\n");
            bytes.extend_from_slice(type_line.as_bytes());
        }

        // Add the empty line that separates the head from the body
        bytes.extend_from_slice(b"\r\n");

        bytes
    }
}

/// Placeholder for a peer address or User-Agent the request did not supply.
pub const UNKNOWN: &str = "unknown";

/// Build the HTML body sent with every 4xx/5xx response.
///
/// It names the error, the client's remote address, and the client's
/// `User-Agent`, substituting `unknown` for whichever is unavailable.
pub fn error_page(status: StatusCode, peer: Option<SocketAddr>, user_agent: Option<&str>) -> String {
    let peer = peer.map_or_else(|| UNKNOWN.to_string(), |peer| peer.to_string());
    let user_agent = user_agent.unwrap_or(UNKNOWN);
    format!(
        "<html><head><title>{status}</title></head>\r\n\
         <body><h1>{status}</h1>\r\n\
         <p>Client: {peer}</p>\r\n\
         <p>User-Agent: {user_agent}</p></body></html>\r\n"
    )
}
