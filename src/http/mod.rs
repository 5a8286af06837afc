//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request per connection, no
//! keep-alive, no chunked transfer-encoding.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine and incremental read loop
//! - **`parser`**: Parses a request out of raw bytes
//! - **`request`**: Request representation with case-insensitive header lookup
//! - **`response`**: Response representation with builder pattern
//! - **`encoding`**: `Accept-Encoding` negotiation and gzip compression
//! - **`writer`**: Serializes and writes responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Accumulate bytes until a full request parses
//!        └──────┬──────┘
//!               │ Request parsed          (malformed → 404 straight to Writing)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route, handle, negotiate encoding
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response, shut the stream down
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use courier::http::connection::Connection;
//! use courier::router::Router;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!     let router = Arc::new(Router::new(None));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = router.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, router);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod encoding;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
