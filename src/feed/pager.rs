//! Cursor-following pagination over a channel feed
//!
//! The pager issues one request at a time, hands each page's casts back to
//! the caller, and stops at the page cap or as soon as a page arrives
//! without a continuation token.

use tracing::{debug, info};

use crate::error::Result;

use super::client::{FeedRequest, FeedSource};
use super::model::FeedRecord;

/// Sequential pager over one channel
pub struct ChannelPager<'a> {
    source: &'a dyn FeedSource,
    channel_id: String,
    page_size: u32,
    max_pages: u32,
    cursor: Option<String>,
    pages_fetched: u32,
    records_fetched: u64,
    exhausted: bool,
}

impl<'a> ChannelPager<'a> {
    /// Create a new pager
    ///
    /// # Arguments
    /// * `source` - Feed source to request pages from
    /// * `channel_id` - Channel to export
    /// * `max_pages` - Page cap; values below 1 are treated as 1
    /// * `page_size` - Casts requested per page
    pub fn new(
        source: &'a dyn FeedSource,
        channel_id: impl Into<String>,
        max_pages: u32,
        page_size: u32,
    ) -> Self {
        Self {
            source,
            channel_id: channel_id.into(),
            page_size,
            max_pages: max_pages.max(1),
            cursor: None,
            pages_fetched: 0,
            records_fetched: 0,
            exhausted: false,
        }
    }

    /// Fetch the next page
    ///
    /// # Returns
    /// * `Result<Option<Vec<FeedRecord>>>` - Casts of the next page, or None once
    ///   the page cap is reached or the previous page carried no cursor
    pub async fn next_page(&mut self) -> Result<Option<Vec<FeedRecord>>> {
        if self.exhausted || self.pages_fetched >= self.max_pages {
            return Ok(None);
        }

        let request = FeedRequest {
            channel_id: self.channel_id.clone(),
            cursor: self.cursor.take(),
            limit: self.page_size,
        };

        let page = match self.source.fetch_page(&request).await {
            Ok(page) => page,
            Err(e) => {
                self.exhausted = true;
                return Err(e);
            }
        };

        self.pages_fetched += 1;
        self.records_fetched += page.casts.len() as u64;

        match page.next_cursor() {
            Some(cursor) => self.cursor = Some(cursor.to_string()),
            None => {
                debug!(
                    "Channel '{}' has no further pages after page {}",
                    self.channel_id, self.pages_fetched
                );
                self.exhausted = true;
            }
        }

        debug!(
            "Fetched page {}/{} with {} casts (total: {})",
            self.pages_fetched,
            self.max_pages,
            page.casts.len(),
            self.records_fetched
        );

        Ok(Some(page.casts))
    }

    /// Drain every remaining page into one list, preserving arrival order
    pub async fn collect_all(&mut self) -> Result<Vec<FeedRecord>> {
        let mut records = Vec::new();
        while let Some(mut casts) = self.next_page().await? {
            records.append(&mut casts);
        }
        info!(
            "Collected {} casts from {} page(s) of channel '{}'",
            records.len(),
            self.pages_fetched,
            self.channel_id
        );
        Ok(records)
    }

    /// Number of pages requested successfully so far
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }
}
