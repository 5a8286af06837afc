use crate::http::request::Request;
use crate::http::response::Response;

pub const PATH: &str = "/user-agent";

/// `/user-agent`: reflects the client's `User-Agent`, or an empty body.
pub fn handle(req: &Request) -> Response {
    Response::text(req.user_agent().unwrap_or_default())
}
