//! Courier - a minimal HTTP/1.1 server over raw TCP
//!
//! Serves `/`, `/echo/{text}`, `/user-agent` and `/files/{name}` with
//! optional gzip content-encoding.

pub mod config;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
pub mod store;
