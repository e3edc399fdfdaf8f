//! # Client
//!
//! A small client speaking the same hand-written HTTP/1.1 as the server,
//! over one persistent TCP connection. Responses are framed strictly by
//! `Content-Length`; HEAD responses are never expected to carry a body.
//!
//! [`script::run_script`] drives the fixed request sequence used to
//! exercise a running server end to end.

pub mod script;

use crate::model::UserRecord;
use crate::router::USERS_PATH;
use anyhow::{anyhow, Context, Result};
use std::fmt;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use tracing::debug;

/// A response as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientResponse {
    pub status: u16,
    pub reason: String,
    /// Header lines in arrival order, names as sent
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ClientResponse {
    /// First header value with a case-insensitively matching name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parsed `Content-Length`, 0 when absent or malformed.
    pub fn content_length(&self) -> usize {
        self.header("content-length")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }
}

impl fmt::Display for ClientResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "HTTP/1.1 {} {}", self.status, self.reason)?;
        for (name, value) in &self.headers {
            writeln!(f, "{name}: {value}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.body)
    }
}

/// Client holding one persistent connection to the server.
pub struct UserClient {
    host: String,
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl UserClient {
    /// Connect to `addr` (`host:port`).
    pub fn connect(addr: &str) -> Result<Self> {
        let writer = TcpStream::connect(addr).with_context(|| format!("connecting to {addr}"))?;
        let reader = BufReader::new(writer.try_clone()?);
        let host = addr
            .rsplit_once(':')
            .map_or(addr, |(host, _)| host)
            .to_string();
        Ok(Self {
            host,
            reader,
            writer,
        })
    }

    /// `POST /users` with the record as body.
    pub fn create(&mut self, user: &UserRecord) -> Result<ClientResponse> {
        let body = user.to_line()?;
        self.send("POST", USERS_PATH, Some(&body))
    }

    /// `GET /users`
    pub fn list_all(&mut self) -> Result<ClientResponse> {
        self.send("GET", USERS_PATH, None)
    }

    /// `GET /users?key=value`
    pub fn list_by(&mut self, key: &str, value: &str) -> Result<ClientResponse> {
        self.send("GET", &format!("{USERS_PATH}?{key}={value}"), None)
    }

    /// `HEAD <target>`; the response body is always empty.
    pub fn head(&mut self, target: &str) -> Result<ClientResponse> {
        self.send("HEAD", target, None)
    }

    /// `PUT /users` with the record (including its id) as body.
    pub fn update(&mut self, user: &UserRecord) -> Result<ClientResponse> {
        let body = user.to_line()?;
        self.send("PUT", USERS_PATH, Some(&body))
    }

    /// `DELETE /users/{id}`
    pub fn delete(&mut self, id: &str) -> Result<ClientResponse> {
        self.send("DELETE", &format!("{USERS_PATH}/{id}"), None)
    }

    /// Send an arbitrary request line with the standard headers and no body.
    pub fn send_raw(&mut self, request_line: &str) -> Result<ClientResponse> {
        let head_request = request_line.starts_with("HEAD ");
        let request = format!(
            "{request_line}\r\nHost: {}\r\nConnection: keep-alive\r\n\r\n",
            self.host
        );
        self.writer.write_all(request.as_bytes())?;
        self.writer.flush()?;
        self.read_response(!head_request)
    }

    fn send(&mut self, method: &str, target: &str, body: Option<&str>) -> Result<ClientResponse> {
        let mut request = format!("{method} {target} HTTP/1.1\r\nHost: {}\r\n", self.host);
        if let Some(body) = body {
            request.push_str("Content-Type: application/json\r\n");
            request.push_str(&format!("Content-Length: {}\r\n", body.len()));
        }
        request.push_str("Connection: keep-alive\r\n\r\n");
        if let Some(body) = body {
            request.push_str(body);
        }
        debug!(method, target, bytes = request.len(), "sending request");

        self.writer.write_all(request.as_bytes())?;
        self.writer.flush()?;
        self.read_response(method != "HEAD")
    }

    fn read_response(&mut self, expect_body: bool) -> Result<ClientResponse> {
        let status_line = read_line(&mut self.reader)?
            .ok_or_else(|| anyhow!("connection closed before status line"))?;
        let mut parts = status_line.splitn(3, ' ');
        let _version = parts.next();
        let status: u16 = parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| anyhow!("bad status line '{status_line}'"))?;
        let reason = parts.next().unwrap_or("").to_string();

        let mut headers = Vec::new();
        while let Some(line) = read_line(&mut self.reader)? {
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                headers.push((name.trim().to_string(), value.trim().to_string()));
            }
        }

        let mut response = ClientResponse {
            status,
            reason,
            headers,
            body: String::new(),
        };
        if expect_body {
            let len = response.content_length() as u64;
            let mut body = Vec::new();
            (&mut self.reader).take(len).read_to_end(&mut body)?;
            response.body = String::from_utf8_lossy(&body).into_owned();
        }
        Ok(response)
    }
}

fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}
