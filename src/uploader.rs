//! Send/acknowledge upload loop.
//!
//! Drives one session: connect, stream the file one line-chunk at a
//! time with a blocking acknowledgement read after each chunk, stop
//! early on the first `success` acknowledgement, then send `quit` and
//! shut the connection down. No retry, no timeout, no pipelining.

use std::path::PathBuf;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info, trace};

use crate::config::Config;
use crate::lines::LineReader;
use crate::protocol::{Ack, ACK_BUFFER_SIZE, QUIT_TOKEN};

/// Uploader instance
pub struct Uploader {
    config: Config,
}

/// Summary of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    /// Line-chunks written to the connection
    pub lines_sent: usize,
    /// Payload bytes written, excluding the quit token
    pub bytes_sent: u64,
    /// Whether a success acknowledgement stopped the transfer early
    pub stopped_early: bool,
}

impl Uploader {
    /// Create a new uploader for the given configuration
    pub fn new(config: Config) -> Self {
        Uploader { config }
    }

    /// Run one upload session.
    ///
    /// The connection is established before the file is opened, so a
    /// missing file fails after a successful connect. Both the socket
    /// and the file handle are released on every exit path; the socket
    /// is shut down explicitly once `quit` has been written.
    pub async fn run(&self) -> Result<UploadReport, UploadError> {
        let stream = TcpStream::connect(&self.config.target)
            .await
            .map_err(UploadError::Connect)?;
        info!(target = %self.config.target, "Connected");

        self.send_lines(stream).await
    }

    async fn send_lines(&self, mut stream: TcpStream) -> Result<UploadReport, UploadError> {
        let file = File::open(&self.config.file)
            .await
            .map_err(|e| UploadError::OpenFile(self.config.file.clone(), e))?;
        debug!(file = %self.config.file.display(), "Source file opened");

        let mut lines = LineReader::new(file);
        let mut report = UploadReport::default();
        let mut ack_buf = [0u8; ACK_BUFFER_SIZE];

        while let Some(chunk) = lines.next_chunk().await? {
            stream.write_all(&chunk).await?;
            report.lines_sent += 1;
            report.bytes_sent += chunk.len() as u64;
            trace!(line = report.lines_sent, len = chunk.len(), "Line sent");

            // Strict alternation: exactly one read per chunk sent
            let n = stream.read(&mut ack_buf).await?;
            let ack = Ack::classify(&ack_buf[..n]);
            if ack.is_success() {
                info!(
                    lines_sent = report.lines_sent,
                    "Peer acknowledged success, stopping transfer"
                );
                report.stopped_early = true;
                break;
            }
            trace!(len = n, "Acknowledgement ignored");
        }

        // quit is sent whether the file was exhausted or the loop
        // stopped early
        stream.write_all(QUIT_TOKEN).await?;
        stream.flush().await?;
        stream.shutdown().await?;
        debug!("Quit token sent, connection shut down");

        Ok(report)
    }
}

/// Upload errors
#[derive(Debug)]
pub enum UploadError {
    /// Target endpoint unreachable or refused the connection
    Connect(std::io::Error),
    /// Source file missing or unreadable
    OpenFile(PathBuf, std::io::Error),
    /// Transport or file I/O failure mid-transfer
    Io(std::io::Error),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::Connect(e) => write!(f, "Failed to connect to target: {}", e),
            UploadError::OpenFile(path, e) => {
                write!(f, "Failed to open source file '{}': {}", path.display(), e)
            }
            UploadError::Io(e) => write!(f, "I/O error during transfer: {}", e),
        }
    }
}

impl std::error::Error for UploadError {}

impl From<std::io::Error> for UploadError {
    fn from(e: std::io::Error) -> Self {
        UploadError::Io(e)
    }
}
