//! CSV export of channel feeds
//!
//! This module turns fetched casts into a downloadable CSV file:
//! - Cell encoding with quote escaping for text values
//! - Flattening of each cast into a fixed 23-column row
//! - Serialization of the header and rows into one document
//! - Delivery to a file (or stdout) without leaving partial artifacts
//!
//! # Architecture
//!
//! 1. **ChannelPager** (in `feed`): fetches pages and follows the cursor
//! 2. **ExportDocument**: flattens and serializes the collected casts
//! 3. **ExportSink**: delivers the finished document
//! 4. **ProgressTracker**: reports pages fetched
//!
//! These components are orchestrated by the **ExportCoordinator**.
//!
//! # Example
//!
//! ```no_run
//! use farcaster_feed_export::config::ApiConfig;
//! use farcaster_feed_export::export::{
//!     ExportCoordinator, ExportRequest, FileSink, ProgressTracker,
//! };
//! use farcaster_feed_export::feed::NeynarClient;
//!
//! # async fn run() -> farcaster_feed_export::Result<()> {
//! let client = NeynarClient::new(&ApiConfig::default(), "NEYNAR_API_DOCS")?;
//! let request = ExportRequest::new("memes", 10, 25);
//! let sink = FileSink::new(request.file_name());
//! let tracker = ProgressTracker::new(request.max_pages, true);
//!
//! let mut coordinator = ExportCoordinator::new(&client, request, tracker, Box::new(sink));
//! let result = coordinator.execute().await?;
//! println!("exported {} casts", result.records_exported);
//! # Ok(())
//! # }
//! ```

pub mod coordinator;
pub mod encoder;
pub mod flatten;
pub mod progress;
pub mod sink;
pub mod table;

#[cfg(test)]
pub(crate) mod fixtures;

pub use coordinator::{ExportCoordinator, ExportPhase, ExportRequest, ExportResult, build_document};
pub use encoder::Cell;
pub use flatten::{COLUMN_COUNT, HEADERS, flatten};
pub use progress::ProgressTracker;
pub use sink::{Delivery, ExportSink, FileSink, StdoutSink, export_file_name};
pub use table::{ExportDocument, serialize};
