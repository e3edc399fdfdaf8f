use http::Method;
use std::fmt;
use std::io::{self, BufRead, Read};
use tracing::debug;

/// How much of the declared body actually arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyState {
    /// `Content-Length` bytes were read (or none were declared)
    Complete,
    /// The stream ended before `Content-Length` bytes arrived
    Short,
    /// Reading the body failed with an I/O error
    Failed,
}

/// A request read off a connection, body included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Raw request target: path plus `?query` if present
    pub target: String,
    pub path: String,
    /// Everything after the first `?`, possibly empty
    pub query: Option<String>,
    /// Version token from the request line; empty when the client omitted it
    pub version: String,
    /// Declared `Content-Length`; malformed values read as 0
    pub content_length: i64,
    pub body: Vec<u8>,
    pub body_state: BodyState,
}

impl Request {
    /// Body decoded as text (invalid UTF-8 is replaced).
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Why no request could be produced.
#[derive(Debug)]
pub enum RequestError {
    /// The peer closed the connection before a new request line
    ConnectionClosed,
    /// The request line could not be understood; headers and body were consumed
    Malformed(String),
    /// Reading the request line or headers failed
    Io(io::Error),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::ConnectionClosed => write!(f, "connection closed by peer"),
            RequestError::Malformed(reason) => write!(f, "malformed request: {reason}"),
            RequestError::Io(e) => write!(f, "I/O error while reading request: {e}"),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RequestError {
    fn from(e: io::Error) -> Self {
        RequestError::Io(e)
    }
}

/// Read one line, stripping the trailing `\r\n` or `\n`.
///
/// Returns `Ok(None)` at end of stream.
fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Parse a `Content-Length` header line, if that is what it is.
///
/// Anything that does not parse as an integer counts as 0.
pub fn parse_content_length(line: &str) -> Option<i64> {
    let (name, value) = line.split_once(':')?;
    if !name.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    Some(value.trim().parse().unwrap_or(0))
}

/// Split a request target into path and optional query at the first `?`.
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}

/// Read the next request from a persistent connection.
///
/// Blank lines before the request line are skipped. Headers are read up to
/// the empty line and only `Content-Length` is kept; the body is then read in
/// full before returning, so the stream is always positioned at the start of
/// the next request, even when the request line turns out to be malformed.
pub fn read_request<R: BufRead>(reader: &mut R) -> Result<Request, RequestError> {
    let request_line = loop {
        match read_line(reader)? {
            None => return Err(RequestError::ConnectionClosed),
            Some(line) if line.is_empty() => continue,
            Some(line) => break line,
        }
    };

    let mut content_length = 0i64;
    while let Some(line) = read_line(reader)? {
        if line.is_empty() {
            break;
        }
        if let Some(len) = parse_content_length(&line) {
            content_length = len;
        }
    }

    let (body, body_state) = read_body(reader, content_length);

    let mut tokens = request_line.split(' ');
    let (method, target) = match (tokens.next(), tokens.next()) {
        (Some(m), Some(t)) if !m.is_empty() && !t.is_empty() => (m, t),
        _ => {
            return Err(RequestError::Malformed(format!(
                "request line '{request_line}' needs a method and a target"
            )))
        }
    };
    let version = tokens.next().unwrap_or("").to_string();
    let method = Method::from_bytes(method.as_bytes())
        .map_err(|_| RequestError::Malformed(format!("invalid method token '{method}'")))?;
    let (path, query) = split_target(target);

    debug!(
        method = %method,
        target = %target,
        content_length,
        body_bytes = body.len(),
        "HTTP request parsed"
    );

    Ok(Request {
        method,
        target: target.to_string(),
        path: path.to_string(),
        query: query.map(str::to_string),
        version,
        content_length,
        body,
        body_state,
    })
}

fn read_body<R: BufRead>(reader: &mut R, content_length: i64) -> (Vec<u8>, BodyState) {
    let Ok(wanted) = u64::try_from(content_length) else {
        return (Vec::new(), BodyState::Complete);
    };
    if wanted == 0 {
        return (Vec::new(), BodyState::Complete);
    }
    let mut body = Vec::new();
    match reader.by_ref().take(wanted).read_to_end(&mut body) {
        Ok(n) if n as u64 == wanted => (body, BodyState::Complete),
        Ok(_) => (body, BodyState::Short),
        Err(e) => {
            debug!(error = %e, "request body read failed");
            (body, BodyState::Failed)
        }
    }
}
