//! Line-chunk reader over an async byte source.
//!
//! Splits the source on the newline byte, retaining the terminator in
//! each chunk. A final line without a trailing newline is still
//! produced; an empty source produces no chunks.

use bytes::Bytes;
use std::io;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Lazy, non-restartable sequence of line-chunks
pub struct LineReader<R> {
    inner: BufReader<R>,
    buf: Vec<u8>,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    pub fn new(source: R) -> Self {
        LineReader {
            inner: BufReader::new(source),
            buf: Vec::new(),
        }
    }

    /// Read the next line-chunk, or `None` at end of input.
    pub async fn next_chunk(&mut self) -> io::Result<Option<Bytes>> {
        self.buf.clear();
        let n = self.inner.read_until(b'\n', &mut self.buf).await?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(Bytes::copy_from_slice(&self.buf)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn collect(input: &[u8]) -> Vec<Bytes> {
        let mut reader = LineReader::new(input);
        let mut chunks = Vec::new();
        while let Some(chunk) = reader.next_chunk().await.unwrap() {
            chunks.push(chunk);
        }
        chunks
    }

    #[tokio::test]
    async fn test_newlines_retained() {
        let chunks = collect(b"a\nb\nc\n").await;
        assert_eq!(chunks, vec!["a\n", "b\n", "c\n"]);
    }

    #[tokio::test]
    async fn test_unterminated_final_line() {
        let chunks = collect(b"first\nsecond").await;
        assert_eq!(chunks, vec![&b"first\n"[..], &b"second"[..]]);
    }

    #[tokio::test]
    async fn test_empty_source_yields_nothing() {
        assert!(collect(b"").await.is_empty());
    }

    #[tokio::test]
    async fn test_blank_lines_are_chunks() {
        let chunks = collect(b"\n\nx\n").await;
        assert_eq!(chunks, vec![&b"\n"[..], &b"\n"[..], &b"x\n"[..]]);
    }
}
