//! Export coordinator for orchestrating channel exports
//!
//! Brings together the pager, the flattener/serializer and an export sink:
//! `Idle → Fetching → Assembling → Exporting → Idle`. A failure in any phase
//! ends the operation with the error and nothing is delivered.

use std::fmt;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::{ConfigError, Result};
use crate::feed::{ChannelPager, FeedRecord, FeedSource};

use super::progress::ProgressTracker;
use super::sink::{ExportSink, export_file_name};
use super::table::ExportDocument;

/// Caller-owned description of one export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Channel to export
    pub channel_id: String,
    /// Page cap, at least 1
    pub max_pages: u32,
    /// Casts requested per page
    pub page_size: u32,
}

impl ExportRequest {
    /// Create a request; a page cap below 1 is raised to 1
    pub fn new(channel_id: impl Into<String>, max_pages: u32, page_size: u32) -> Self {
        Self {
            channel_id: channel_id.into(),
            max_pages: max_pages.max(1),
            page_size,
        }
    }

    /// Check the request can be run
    ///
    /// The channel id ends up in the file name, so it must be non-empty and
    /// free of path separators.
    pub fn validate(&self) -> Result<()> {
        if self.channel_id.trim().is_empty() {
            return Err(ConfigError::MissingField("channel id".to_string()).into());
        }
        if self.channel_id.contains(['/', '\\']) || self.channel_id == ".." {
            return Err(ConfigError::InvalidValue {
                field: "channel id".to_string(),
                value: self.channel_id.clone(),
            }
            .into());
        }
        if !(1..=crate::config::MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(ConfigError::InvalidValue {
                field: "page size".to_string(),
                value: self.page_size.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Default file name for this export
    pub fn file_name(&self) -> String {
        export_file_name(&self.channel_id)
    }
}

/// Phase of a running export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Idle,
    Fetching { page: u32 },
    Assembling,
    Exporting,
}

impl fmt::Display for ExportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportPhase::Idle => write!(f, "idle"),
            ExportPhase::Fetching { page } => write!(f, "fetching page {page}"),
            ExportPhase::Assembling => write!(f, "assembling"),
            ExportPhase::Exporting => write!(f, "exporting"),
        }
    }
}

/// Result of an export operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Number of casts exported
    pub records_exported: usize,
    /// Number of pages fetched
    pub pages_fetched: u32,
    /// Where the document was delivered
    pub destination: String,
    /// Bytes written
    pub bytes_written: u64,
    /// Time taken for the export
    pub elapsed_ms: u64,
}

/// Fetch every page of a channel and assemble the CSV document
///
/// Stateless: everything it needs comes from `source` and `request`.
pub async fn build_document(
    source: &dyn FeedSource,
    request: &ExportRequest,
) -> Result<ExportDocument> {
    request.validate()?;
    let mut pager = ChannelPager::new(
        source,
        request.channel_id.clone(),
        request.max_pages,
        request.page_size,
    );
    let records = pager.collect_all().await?;
    ExportDocument::from_records(&records)
}

/// Coordinator for export operations
pub struct ExportCoordinator<'a> {
    /// Feed source pages are requested from
    source: &'a dyn FeedSource,
    /// Export parameters
    request: ExportRequest,
    /// Progress tracker for user feedback
    tracker: ProgressTracker,
    /// Destination of the finished document
    sink: Box<dyn ExportSink + 'a>,
    /// Current phase
    phase: ExportPhase,
}

impl<'a> ExportCoordinator<'a> {
    /// Create a new export coordinator
    pub fn new(
        source: &'a dyn FeedSource,
        request: ExportRequest,
        tracker: ProgressTracker,
        sink: Box<dyn ExportSink + 'a>,
    ) -> Self {
        Self {
            source,
            request,
            tracker,
            sink,
            phase: ExportPhase::Idle,
        }
    }

    /// Current phase
    pub fn phase(&self) -> ExportPhase {
        self.phase
    }

    fn enter(&mut self, phase: ExportPhase) {
        debug!("Export of '{}': {}", self.request.channel_id, phase);
        self.phase = phase;
        if phase != ExportPhase::Idle {
            self.tracker.set_phase(&phase.to_string());
        }
    }

    /// Execute the export operation
    ///
    /// 1. Fetch pages until the cap or the last cursor
    /// 2. Flatten and serialize every cast
    /// 3. Deliver the document to the sink
    ///
    /// # Returns
    /// * `Result<ExportResult>` - Export statistics or error
    pub async fn execute(&mut self) -> Result<ExportResult> {
        let outcome = self.run().await;
        self.tracker.finish();
        self.enter(ExportPhase::Idle);
        outcome
    }

    async fn run(&mut self) -> Result<ExportResult> {
        self.request.validate()?;
        let start_time = Instant::now();

        info!(
            "Starting export of channel '{}' (up to {} pages)",
            self.request.channel_id, self.request.max_pages
        );

        let (records, pages_fetched) = self.fetch().await?;

        self.enter(ExportPhase::Assembling);
        let document = ExportDocument::from_records(&records)?;
        drop(records);

        self.enter(ExportPhase::Exporting);
        let delivery = self.sink.deliver(&document).await?;

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Export completed: {} casts, {} pages, {} bytes, {} ms",
            document.rows(),
            pages_fetched,
            delivery.bytes,
            elapsed_ms
        );

        Ok(ExportResult {
            records_exported: document.rows(),
            pages_fetched,
            destination: delivery.destination,
            bytes_written: delivery.bytes,
            elapsed_ms,
        })
    }

    async fn fetch(&mut self) -> Result<(Vec<FeedRecord>, u32)> {
        let source = self.source;
        let mut pager = ChannelPager::new(
            source,
            self.request.channel_id.clone(),
            self.request.max_pages,
            self.request.page_size,
        );
        let mut records = Vec::new();

        loop {
            self.enter(ExportPhase::Fetching {
                page: pager.pages_fetched() + 1,
            });

            match pager.next_page().await? {
                Some(mut casts) => {
                    records.append(&mut casts);
                    self.tracker
                        .update(pager.pages_fetched(), records.len() as u64);
                }
                None => break,
            }
        }

        Ok((records, pager.pages_fetched()))
    }
}
