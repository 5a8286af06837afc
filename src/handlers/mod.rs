//! Request handlers.
//!
//! Each handler turns a parsed [`Request`] into a [`Response`]. Content
//! encoding is applied afterwards by the connection, not here.

pub mod echo;
pub mod files;
pub mod user_agent;

use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};

/// `GET /`: an empty 200.
pub fn root(_req: &Request) -> Response {
    Response::empty(StatusCode::Ok)
}

pub fn not_found(req: &Request) -> Response {
    tracing::debug!(method = %req.method, path = %req.path, "No route matched");
    Response::not_found()
}
