//! Minimal HTTP/1.1 wire layer: request reading and response writing.
//!
//! One request is read per connection; the response always carries
//! `Connection: close`. Headers are consumed but only `Content-Length` is
//! interpreted: just enough surface for the endpoints this service exposes,
//! not a general HTTP implementation.

use std::io;

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

/// `Server` response header value.
pub const SERVER_NAME: &str = concat!("primrust-server/", env!("CARGO_PKG_VERSION"));

/// Upper bound on the request head (request line + headers).
const MAX_HEAD_BYTES: usize = 16 * 1024;

/// Upper bound on the request body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// HTTP request methods understood by the parser.
///
/// Anything else fails the parse and drops the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Head,
    Put,
    Patch,
    Delete,
    Options,
}

impl Method {
    pub fn parse(token: &str) -> Option<Method> {
        match token {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "HEAD" => Some(Method::Head),
            "PUT" => Some(Method::Put),
            "PATCH" => Some(Method::Patch),
            "DELETE" => Some(Method::Delete),
            "OPTIONS" => Some(Method::Options),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Head => "HEAD",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
        }
    }
}

/// Response status codes used by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::InternalServerError => 500,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::NotFound => "Not Found",
            Status::InternalServerError => "Internal Server Error",
        }
    }
}

/// A parsed HTTP request.
#[derive(Debug)]
pub struct Request {
    pub method: Method,
    /// Raw request target, e.g. `/prime?number=97&fast`.
    pub target: String,
    pub body: String,
}

/// An HTTP response ready for serialization.
#[derive(Debug)]
pub struct Response {
    pub status: Status,
    pub body: String,
    pub content_type: &'static str,
}

impl Response {
    pub fn json(status: Status, body: String) -> Response {
        Response {
            status,
            body,
            content_type: "application/json",
        }
    }

    pub fn text(status: Status, body: String) -> Response {
        Response {
            status,
            body,
            content_type: "text/plain",
        }
    }

    /// Builds the uniform JSON error body `{"error": "<message>"}`.
    pub fn error(status: Status, message: &str) -> Response {
        let body = serde_json::json!({ "error": message }).to_string();
        Response::json(status, body)
    }

    /// Serializes status line, headers, and body into wire bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {} {}\r\nServer: {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status.code(),
            self.status.reason(),
            SERVER_NAME,
            self.content_type,
            self.body.len()
        );
        let mut bytes = Vec::with_capacity(head.len() + self.body.len());
        bytes.extend_from_slice(head.as_bytes());
        bytes.extend_from_slice(self.body.as_bytes());
        bytes
    }
}

fn invalid(message: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Reads one full HTTP request from `stream` into `buf`.
///
/// Returns `Ok(None)` when the peer closes before sending anything. Any
/// malformed head, oversized message, or transport failure surfaces as an
/// `Err`; the caller drops the connection without answering, mirroring the
/// recovery policy for transport errors.
pub async fn read_request(
    stream: &mut TcpStream,
    buf: &mut Vec<u8>,
) -> io::Result<Option<Request>> {
    let head_end = loop {
        if let Some(pos) = find_head_end(buf) {
            break pos;
        }
        if buf.len() > MAX_HEAD_BYTES {
            return Err(invalid("request head too large"));
        }
        let n = stream.read_buf(buf).await?;
        if n == 0 {
            return if buf.is_empty() {
                Ok(None)
            } else {
                Err(io::ErrorKind::UnexpectedEof.into())
            };
        }
    };

    let head =
        std::str::from_utf8(&buf[..head_end]).map_err(|_| invalid("request head not UTF-8"))?;
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split(' ');
    let method = parts
        .next()
        .and_then(Method::parse)
        .ok_or_else(|| invalid("unsupported method"))?;
    let target = parts
        .next()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| invalid("missing request target"))?
        .to_string();
    if !parts
        .next()
        .is_some_and(|version| version.starts_with("HTTP/"))
    {
        return Err(invalid("malformed request line"));
    }

    let mut content_length = 0usize;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value
                    .trim()
                    .parse()
                    .map_err(|_| invalid("malformed Content-Length"))?;
            }
        }
    }
    if content_length > MAX_BODY_BYTES {
        return Err(invalid("request body too large"));
    }

    let body_start = head_end + 4;
    while buf.len() < body_start + content_length {
        let n = stream.read_buf(buf).await?;
        if n == 0 {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
    }

    let body = String::from_utf8_lossy(&buf[body_start..body_start + content_length]).into_owned();
    Ok(Some(Request {
        method,
        target,
        body,
    }))
}
