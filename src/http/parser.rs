use crate::http::request::{Method, Request};
use std::collections::HashMap;
use thiserror::Error;

/// Length of the shortest request line we accept: `GET / HTTP/1.1`.
pub const MIN_REQUEST_LINE_LEN: usize = 14;

/// Largest `Content-Length` we are willing to buffer.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("request line shorter than 14 bytes")]
    TooShort,
    #[error("malformed request line")]
    InvalidRequestLine,
    #[error("request path must start with '/'")]
    InvalidPath,
    #[error("malformed header line")]
    InvalidHeader,
    #[error("invalid Content-Length value")]
    InvalidContentLength,
    #[error("Content-Length exceeds {} bytes", MAX_BODY_BYTES)]
    BodyTooLarge,
    #[error("incomplete request")]
    Incomplete,
}

/// Parses one request out of `buf`.
///
/// Returns the request together with the number of bytes it occupied. Any
/// bytes past the declared body (e.g. zero padding from a fixed-size read)
/// are left untouched. `ParseError::Incomplete` means more bytes are needed.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    // Look for header/body separator
    let headers_end = find_headers_end(buf).ok_or(ParseError::Incomplete)?;
    let header_bytes = &buf[..headers_end];
    let body_bytes = &buf[headers_end + 4..];

    let headers_str =
        std::str::from_utf8(header_bytes).map_err(|_| ParseError::InvalidRequestLine)?;

    let mut lines = headers_str.split("\r\n");

    // Request line
    let request_line = lines.next().unwrap_or_default();
    let (method, path, version) = parse_request_line(request_line)?;

    // Headers
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once(':').ok_or(ParseError::InvalidHeader)?;

        headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    // Body
    let content_length = headers
        .get("content-length")
        .map(|v| v.parse::<usize>().map_err(|_| ParseError::InvalidContentLength))
        .transpose()?
        .unwrap_or(0);

    if content_length > MAX_BODY_BYTES {
        return Err(ParseError::BodyTooLarge);
    }

    if body_bytes.len() < content_length {
        return Err(ParseError::Incomplete);
    }

    let body = body_bytes[..content_length].to_vec();

    let request = Request {
        method,
        path,
        version,
        headers,
        body,
    };

    let total_consumed = headers_end + 4 + content_length;
    Ok((request, total_consumed))
}

/// Splits `<METHOD> <PATH> <VERSION>` on the first two spaces.
fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
    if line.len() < MIN_REQUEST_LINE_LEN {
        return Err(ParseError::TooShort);
    }

    let (method, rest) = line
        .split_once(' ')
        .ok_or(ParseError::InvalidRequestLine)?;
    let (path, version) = rest
        .split_once(' ')
        .ok_or(ParseError::InvalidRequestLine)?;

    if method.is_empty() {
        return Err(ParseError::InvalidRequestLine);
    }
    if !path.starts_with('/') {
        return Err(ParseError::InvalidPath);
    }

    Ok((
        Method::from(method),
        path.to_string(),
        version.trim().to_string(),
    ))
}

/// Position of the `\r\n\r\n` that terminates the header block, if present.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
