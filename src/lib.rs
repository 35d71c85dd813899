//! Farcaster channel feed exporter
//!
//! This library pages through the Neynar channel feed API, flattens every
//! cast into a fixed 23-column row and serializes the result as CSV.
//! It backs the `farcaster-feed-export` binary and can be used on its own.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `export`: Flattening, CSV serialization and delivery
//! - `feed`: Feed API client, records and pagination
//!
//! # Example
//!
//! ```no_run
//! use farcaster_feed_export::{Config, ExportRequest, NeynarClient, build_document};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let client = NeynarClient::new(&config.api, "NEYNAR_API_DOCS")?;
//!
//!     let request = ExportRequest::new("memes", 3, config.api.page_size);
//!     let document = build_document(&client, &request).await?;
//!
//!     std::fs::write(request.file_name(), document.as_bytes())?;
//!     println!("Exported {} casts", document.rows());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod feed;

// Re-export commonly used types
pub use config::Config;
pub use error::{FeedExportError, Result};
pub use export::{ExportCoordinator, ExportDocument, ExportRequest, ExportResult, build_document};
pub use feed::{ChannelPager, FeedRecord, FeedSource, NeynarClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}
