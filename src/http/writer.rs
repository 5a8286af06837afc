use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Renders a response in HTTP/1.1 wire format.
///
/// Headers are emitted in name order so output is stable, followed by a
/// `Content-Length` computed from the body.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128 + resp.content_length());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    let mut headers: Vec<_> = resp.headers.iter().collect();
    headers.sort_by(|a, b| a.0.cmp(b.0));

    for (k, v) in headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(format!("Content-Length: {}\r\n", resp.content_length()).as_bytes());

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    // Body
    buf.extend_from_slice(resp.body_bytes());

    buf
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub async fn write_to_stream<S>(&mut self, stream: &mut S) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::StatusCode;

    #[test]
    fn header_only_response_has_no_body_bytes() {
        let bytes = serialize_response(&Response::empty(StatusCode::Created));
        assert_eq!(
            bytes,
            b"HTTP/1.1 201 Created\r\nContent-Length: 0\r\n\r\n".to_vec()
        );
    }

    #[tokio::test]
    async fn writer_drains_whole_buffer() {
        let response = Response::text("hello");
        let mut writer = ResponseWriter::new(&response);
        let mut out = Vec::new();

        writer.write_to_stream(&mut out).await.unwrap();

        assert_eq!(out, serialize_response(&response));
        assert!(out.ends_with(b"\r\n\r\nhello"));
    }
}
