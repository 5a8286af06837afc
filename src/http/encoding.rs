//! Content-Encoding negotiation.
//!
//! Picks the first `Accept-Encoding` token the server can produce and
//! compresses the response body with it. Only gzip is supported.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use thiserror::Error;

use crate::http::response::Response;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Gzip,
}

impl Encoding {
    /// Token used in `Accept-Encoding` / `Content-Encoding`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Gzip => "gzip",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("gzip") {
            Some(Encoding::Gzip)
        } else {
            None
        }
    }

    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>, EncodingError> {
        match self {
            Encoding::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                Ok(encoder.finish()?)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("compression failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Returns the first supported encoding listed in an `Accept-Encoding` value.
///
/// Tokens are comma-separated and trimmed; parameters after `;` are dropped,
/// except that `q=0` marks a token as not acceptable.
///
/// # Example
///
/// ```
/// # use courier::http::encoding::{negotiate, Encoding};
/// assert_eq!(negotiate("br, gzip"), Some(Encoding::Gzip));
/// assert_eq!(negotiate("identity, br"), None);
/// ```
pub fn negotiate(accept_encoding: &str) -> Option<Encoding> {
    accept_encoding.split(',').find_map(|raw| {
        let mut parts = raw.split(';');
        let token = parts.next().unwrap_or_default().trim();

        let refused = parts.any(|param| {
            param
                .trim()
                .strip_prefix("q=")
                .and_then(|q| q.trim().parse::<f32>().ok())
                .is_some_and(|q| q == 0.0)
        });

        if refused {
            None
        } else {
            Encoding::from_token(token)
        }
    })
}

/// Applies the negotiated encoding to `response`.
///
/// Header-only responses and requests without a usable token pass through
/// unchanged. A present but empty body is still compressed. A compression
/// failure turns into a 500.
pub fn encode_response(response: Response, accept_encoding: Option<&str>) -> Response {
    let Some(encoding) = accept_encoding.and_then(negotiate) else {
        return response;
    };

    let Some(body) = response.body.as_deref() else {
        return response;
    };

    match encoding.encode(body) {
        Ok(compressed) => {
            let mut response = response;
            response.body = Some(compressed);
            response
                .headers
                .insert("Content-Encoding".to_string(), encoding.as_str().to_string());
            response
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                encoding = encoding.as_str(),
                "Failed to encode response body"
            );
            Response::internal_error()
        }
    }
}
