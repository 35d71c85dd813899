//! Error handling for feed export operations.
//!
//! Every boundary of the export pipeline returns an explicit [`Result`]:
//! - `ApiError` for rejected or malformed feed API calls
//! - `RecordError` for casts that cannot be flattened
//! - `ConfigError` for invalid configuration or missing inputs
//!
//! # Example
//!
//! ```rust
//! use farcaster_feed_export::error::{ConfigError, FeedExportError, Result};
//!
//! fn require_channel(channel: &str) -> Result<()> {
//!     if channel.is_empty() {
//!         return Err(ConfigError::MissingField("channel".to_string()).into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(matches!(require_channel(""), Err(FeedExportError::Config(_))));
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ApiError, ConfigError, FeedExportError, RecordError, Result};
