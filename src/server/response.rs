use http::StatusCode;
use std::io::{self, Write};
use std::time::SystemTime;

/// Reason phrase for a status code, as written on the status line.
pub fn status_reason(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown")
}

/// An HTTP response with a plain-text body.
///
/// For HEAD responses the body is still carried so that `Content-Length`
/// reflects what the GET variant would have sent; only its bytes are
/// withheld on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub body: String,
    pub head_only: bool,
}

impl Response {
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            head_only: false,
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::text(StatusCode::OK, body)
    }

    pub fn bad_request(body: impl Into<String>) -> Self {
        Self::text(StatusCode::BAD_REQUEST, body)
    }

    pub fn not_found(body: impl Into<String>) -> Self {
        Self::text(StatusCode::NOT_FOUND, body)
    }

    pub fn internal_error(body: impl Into<String>) -> Self {
        Self::text(StatusCode::INTERNAL_SERVER_ERROR, body)
    }

    /// Turn a GET response into its HEAD counterpart.
    #[must_use]
    pub fn into_head(mut self) -> Self {
        self.head_only = true;
        self
    }

    /// Byte length of the logical body, sent for GET and HEAD alike.
    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    /// Serialize status line, headers and (unless HEAD) the body.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.write_to_at(out, SystemTime::now())
    }

    /// Same as [`Response::write_to`] with an explicit `Date`.
    pub fn write_to_at<W: Write>(&self, out: &mut W, date: SystemTime) -> io::Result<()> {
        let head = format!(
            "HTTP/1.1 {} {}\r\nDate: {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n\r\n",
            self.status.as_u16(),
            status_reason(self.status),
            httpdate::fmt_http_date(date),
            self.content_length()
        );
        out.write_all(head.as_bytes())?;
        if !self.head_only {
            out.write_all(self.body.as_bytes())?;
        }
        out.flush()
    }
}
