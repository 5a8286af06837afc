use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::encoding::encode_response;
use crate::http::parser::{ParseError, find_headers_end, parse_http_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

/// Size of each individual socket read.
pub const READ_CHUNK_SIZE: usize = 1024;

/// Upper bound on the request line plus headers.
pub const MAX_HEADER_BYTES: usize = 64 * 1024;

/// One client connection: one request in, one response out, then close.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    router: Arc<Router>,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

/// What the read loop produced.
#[derive(Debug)]
pub enum ReadOutcome {
    Request(Request),
    Malformed(ParseError),
    /// Peer closed before sending a single byte.
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
            router,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_request().await? {
                    ReadOutcome::Request(req) => {
                        self.state = ConnectionState::Processing(req);
                    }
                    ReadOutcome::Malformed(e) => {
                        tracing::warn!(error = %e, "Malformed request, answering 404");
                        let writer = ResponseWriter::new(&Response::not_found());
                        self.state = ConnectionState::Writing(writer);
                    }
                    ReadOutcome::Closed => {
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(req) => {
                    let response = Self::handle_request(&self.router, req).await;

                    tracing::info!(
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        bytes = response.content_length(),
                        "Request handled"
                    );

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    // No keep-alive: every connection carries exactly one exchange
                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "Shutdown after response failed");
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until a whole request (headers plus `Content-Length` body) is
    /// buffered.
    ///
    /// Only the byte count each read reports is appended. A 0-byte read is
    /// end-of-data: with nothing buffered it means the client went away,
    /// otherwise the request was cut short.
    pub async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(ReadOutcome::Request(request));
                }

                Err(ParseError::Incomplete) => {
                    if find_headers_end(&self.buffer).is_none()
                        && self.buffer.len() > MAX_HEADER_BYTES
                    {
                        return Ok(ReadOutcome::Malformed(ParseError::InvalidRequestLine));
                    }
                }

                Err(e) => {
                    return Ok(ReadOutcome::Malformed(e));
                }
            }

            let mut temp = [0u8; READ_CHUNK_SIZE];
            let n = self.stream.read(&mut temp).await?;

            if n == 0 {
                if self.buffer.is_empty() {
                    return Ok(ReadOutcome::Closed);
                }
                return Ok(ReadOutcome::Malformed(ParseError::Incomplete));
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }

    async fn handle_request(router: &Router, req: &Request) -> Response {
        let response = router.dispatch(req).await;
        encode_response(response, req.accept_encoding())
    }
}
