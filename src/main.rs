//! line-uploader: a line-at-a-time TCP file uploader
//!
//! Streams a local file to a single TCP peer one line at a time,
//! reading an acknowledgement after every line. The first ack that is
//! exactly `success` stops the transfer early; any other ack is
//! ignored. A `quit` token always closes the session.
//!
//! Features:
//! - Strict send/acknowledge alternation, no pipelining
//! - Configuration via CLI arguments or TOML file
//! - Text or JSON log output

mod config;
mod lines;
mod protocol;
mod uploader;

use config::{Config, LogFormat};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uploader::Uploader;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init(),
    }

    info!(
        target = %config.target,
        file = %config.file.display(),
        "Starting line-uploader"
    );

    // One session, one task: the whole transfer is sequential
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let report = runtime.block_on(Uploader::new(config).run())?;

    info!(
        lines_sent = report.lines_sent,
        bytes_sent = report.bytes_sent,
        stopped_early = report.stopped_early,
        "Upload finished"
    );

    Ok(())
}
