use crate::http::request::Request;
use crate::http::response::Response;

pub const PREFIX: &str = "/echo/";

/// `/echo/{text}`: returns everything after the prefix as plain text.
///
/// The remainder is opaque, so `/echo/a/b` echoes `a/b` and percent escapes
/// are sent back undecoded.
pub fn handle(req: &Request) -> Response {
    let text = req.path.strip_prefix(PREFIX).unwrap_or_default();
    Response::text(text)
}
