//! Transport session module
//!
//! One request/response exchange per connection: write the selector followed
//! by CRLF, then read until the peer closes the stream.

use anyhow::Result;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, error, info};

use crate::error::GopherError;
use crate::session::frame::{copy_raw, copy_terminated, is_raw_type};

/// A session bound to one origin server.
///
/// Each operation opens a fresh connection; the protocol has no multi-request
/// connections. There are no timeouts and no retries here, so a stalled peer
/// stalls the caller.
#[derive(Debug, Clone)]
pub struct GopherSession {
    host: String,
    port: u16,
}

impl GopherSession {
    /// Create a session for the given origin
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The origin address as `host:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    async fn request(&self, selector: &str) -> Result<TcpStream> {
        let addr = self.addr();
        debug!("Connecting to {}", addr);

        let mut stream = TcpStream::connect(&addr).await.map_err(|e| {
            error!("Failed to connect to {}: {}", addr, e);
            GopherError::connection_error_full("Failed to connect", addr.clone(), e.to_string())
        })?;

        info!("Sending request {:?} to {}", selector, addr);
        stream
            .write_all(format!("{}\r\n", selector).as_bytes())
            .await
            .map_err(|e| {
                error!("Failed to send request to {}: {}", addr, e);
                GopherError::connection_error_full("Failed to send request", addr, e.to_string())
            })?;
        stream.flush().await.map_err(GopherError::from)?;

        Ok(stream)
    }

    /// Fetch a listing response as an ordered sequence of lines.
    ///
    /// The full response is buffered; listing responses are small. When
    /// `drop_terminator` is set the final line (the lone `.` the protocol
    /// appends) is removed so it never reaches the listing parser.
    pub async fn fetch_listing(&self, selector: &str, drop_terminator: bool) -> Result<Vec<String>> {
        let mut stream = self.request(selector).await?;

        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.map_err(|e| {
            error!("Failed to read listing from {}: {}", self.addr(), e);
            GopherError::io_error_with_source("Failed to read listing", e.to_string())
        })?;

        let text = String::from_utf8_lossy(&response);
        let mut lines: Vec<String> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();

        // A final newline leaves one empty trailing entry behind the split.
        if lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        if drop_terminator {
            lines.pop();
        }

        debug!("Received {} listing lines from {:?}", lines.len(), selector);
        Ok(lines)
    }

    /// Stream an item's content into the sink, returning the bytes written.
    ///
    /// Framing is selected by the raw type code: types `5` and `9` carry no
    /// end marker and are copied verbatim; everything else has its trailing
    /// `CR LF '.'` stripped.
    pub async fn download<W>(&self, selector: &str, raw_type: &str, sink: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let mut stream = self.request(selector).await?;

        let written = if is_raw_type(raw_type) {
            copy_raw(&mut stream, sink).await?
        } else {
            copy_terminated(&mut stream, sink).await?
        };

        info!("Downloaded {} bytes for selector {:?}", written, selector);
        Ok(written)
    }
}
