//! Response framing utilities
//!
//! Gopher content responses normally end with a 3-byte marker (`CR LF '.'`)
//! that must not reach the sink; the two raw binary sub-types carry no
//! marker and end with plain stream close.

use anyhow::Result;
use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Length of the end-of-response marker (`CR LF '.'`)
pub const TERMINATOR_LEN: usize = 3;

const CHUNK_SIZE: usize = 8192;

/// Whether a raw type code selects unterminated (raw) framing
pub fn is_raw_type(raw_type: &str) -> bool {
    matches!(raw_type, "5" | "9")
}

/// Copy a terminated response, stripping the trailing end marker.
///
/// The marker's position is unknown until the stream ends, so this holds
/// back the most recently read chunk: each new read flushes the previous
/// chunk in full, and end-of-stream flushes the held-back chunk minus its
/// trailing 3 bytes. A zero-byte stream writes nothing. Returns the number
/// of bytes written to the sink.
pub async fn copy_terminated<R, W>(reader: &mut R, sink: &mut W) -> Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = [0u8; CHUNK_SIZE];
    let mut pending: Option<Bytes> = None;
    let mut written: u64 = 0;

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            if let Some(last) = pending {
                let keep = last.len().saturating_sub(TERMINATOR_LEN);
                if keep > 0 {
                    sink.write_all(&last[..keep]).await?;
                    written += keep as u64;
                }
            }
            break;
        }

        if let Some(prev) = pending.take() {
            sink.write_all(&prev).await?;
            written += prev.len() as u64;
        }

        let mut chunk = BytesMut::with_capacity(n);
        chunk.extend_from_slice(&buf[..n]);
        pending = Some(chunk.freeze());
    }

    sink.flush().await?;
    Ok(written)
}

/// Copy an unterminated response byte-for-byte until end-of-stream.
///
/// Returns the number of bytes written to the sink.
pub async fn copy_raw<R, W>(reader: &mut R, sink: &mut W) -> Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = [0u8; CHUNK_SIZE];
    let mut written: u64 = 0;

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        sink.write_all(&buf[..n]).await?;
        written += n as u64;
    }

    sink.flush().await?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_raw_type() {
        assert!(is_raw_type("5"));
        assert!(is_raw_type("9"));
        assert!(!is_raw_type("0"));
        assert!(!is_raw_type("1"));
        assert!(!is_raw_type("g"));
    }

    #[tokio::test]
    async fn test_copy_terminated_strips_marker() {
        let data = b"hello gopher world\r\n.".to_vec();
        let mut sink = Vec::new();

        let written = copy_terminated(&mut data.as_slice(), &mut sink).await.unwrap();

        assert_eq!(sink, b"hello gopher world");
        assert_eq!(written, sink.len() as u64);
    }

    #[tokio::test]
    async fn test_copy_terminated_empty_stream_writes_nothing() {
        let data: Vec<u8> = Vec::new();
        let mut sink = Vec::new();

        let written = copy_terminated(&mut data.as_slice(), &mut sink).await.unwrap();

        assert!(sink.is_empty());
        assert_eq!(written, 0);
    }

    #[tokio::test]
    async fn test_copy_terminated_multi_chunk_body() {
        let mut data = vec![0xabu8; CHUNK_SIZE * 2 + 100];
        data.extend_from_slice(b"\r\n.");
        let mut sink = Vec::new();

        let written = copy_terminated(&mut data.as_slice(), &mut sink).await.unwrap();

        assert_eq!(sink.len(), CHUNK_SIZE * 2 + 100);
        assert!(sink.iter().all(|&b| b == 0xab));
        assert_eq!(written, sink.len() as u64);
    }

    #[tokio::test]
    async fn test_copy_raw_is_byte_identical() {
        let data = b"binary body containing \r\n. marker bytes \r\n.".to_vec();
        let mut sink = Vec::new();

        let written = copy_raw(&mut data.as_slice(), &mut sink).await.unwrap();

        assert_eq!(sink, data);
        assert_eq!(written, data.len() as u64);
    }

    #[tokio::test]
    async fn test_copy_raw_empty_stream() {
        let data: Vec<u8> = Vec::new();
        let mut sink = Vec::new();

        let written = copy_raw(&mut data.as_slice(), &mut sink).await.unwrap();

        assert!(sink.is_empty());
        assert_eq!(written, 0);
    }
}
