//! HTTP request head reading and validation.

use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::parser::error::Error;
use crate::parser::headers::Headers;

/// A structurally valid HTTP/1.0 request head.
///
/// Method, target, and version are the raw tokens of the request line,
/// which is only accepted when it splits into exactly three
/// whitespace-separated fields. Dispatch matches the method token
/// case-sensitively; the version token is stored but never validated.
#[derive(Debug, Clone)]
pub struct Request {
    /// The method token exactly as sent
    pub method: String,
    /// The target URI, interpreted relative to the served root
    pub target: String,
    /// The protocol version token
    pub version: String,
    /// The request headers
    pub headers: Headers,
    /// True when the head needed lossy UTF-8 recovery. Byte-accurate body
    /// reads are then untrustworthy, so POST is answered with 500.
    pub lossy: bool,
}

impl Request {
    /// The client's `User-Agent` header, if it sent one.
    pub fn user_agent(&self) -> Option<&str> {
        self.headers.get("User-Agent")
    }
}

/// The outcome of reading one connection's request head.
#[derive(Debug)]
pub enum Incoming {
    /// The request line split into exactly three fields.
    Request(Request),
    /// Any other field count. The headers are still read and kept so an
    /// error page can name the client's `User-Agent`.
    Malformed {
        /// The offending request line
        line: String,
        /// The headers that followed it
        headers: Headers,
    },
}

/// Read exactly one request head: a request line, then header lines up to
/// the first empty line.
///
/// Header lines split at their first run of whitespace into a name and a
/// value; a line that does not yield two non-empty parts is dropped without
/// comment. A later occurrence of a header name overwrites an earlier one.
///
/// Lines whose bytes are not valid UTF-8 are recovered lossily and mark the
/// head as such; see [`Request::lossy`].
pub async fn read_request<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<Incoming, Error> {
    let mut lossy = false;

    let request_line = match read_line(reader, &mut lossy).await? {
        Some(line) => line,
        None => return Err(Error::TruncatedHead),
    };
    debug!("request line: {request_line}");

    let mut headers = Headers::new();
    loop {
        let line = match read_line(reader, &mut lossy).await? {
            Some(line) => line,
            None => return Err(Error::TruncatedHead),
        };
        if line.is_empty() {
            break;
        }
        debug!("header line: {line}");
        if let Some((name, value)) = split_header(&line) {
            headers.insert(name, value);
        }
    }

    let fields: Vec<&str> = request_line.split_whitespace().collect();
    if fields.len() != 3 {
        return Ok(Incoming::Malformed {
            line: request_line,
            headers,
        });
    }

    Ok(Incoming::Request(Request {
        method: fields[0].to_string(),
        target: fields[1].to_string(),
        version: fields[2].to_string(),
        headers,
        lossy,
    }))
}

/// Read one line, accepting both `\r\n` and bare `\n` terminators. Returns
/// `None` on EOF with no bytes read. Invalid UTF-8 is recovered lossily and
/// flips `lossy`.
async fn read_line<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    lossy: &mut bool,
) -> Result<Option<String>, Error> {
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf).await?;
    if n == 0 {
        return Ok(None);
    }
    if buf.ends_with(b"\n") {
        buf.pop();
    }
    if buf.ends_with(b"\r") {
        buf.pop();
    }
    let line = match String::from_utf8(buf) {
        Ok(line) => line,
        Err(e) => {
            *lossy = true;
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    Ok(Some(line))
}

/// Split a header line at its first run of whitespace.
fn split_header(line: &str) -> Option<(&str, &str)> {
    let at = line.find(char::is_whitespace)?;
    let name = &line[..at];
    let value = line[at..].trim();
    if name.is_empty() || value.is_empty() {
        return None;
    }
    Some((name, value))
}
