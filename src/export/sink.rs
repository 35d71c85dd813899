//! Delivery of a finished document
//!
//! A [`FileSink`] writes through a sibling `.part` file and renames it into
//! place once everything is flushed, so an interrupted write never leaves a
//! half-written CSV behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};

use super::table::ExportDocument;

/// Prefix of every exported file name
pub const FILE_PREFIX: &str = "farcaster_feed_";

/// File name an export of `channel_id` is saved under
///
/// ```
/// use farcaster_feed_export::export::export_file_name;
///
/// assert_eq!(export_file_name("abc"), "farcaster_feed_abc.csv");
/// ```
pub fn export_file_name(channel_id: &str) -> String {
    format!("{FILE_PREFIX}{channel_id}.csv")
}

/// Where a document ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Human-readable destination
    pub destination: String,
    /// Bytes written
    pub bytes: u64,
}

/// Trait for delivering an export document
#[async_trait]
pub trait ExportSink: Send {
    /// Deliver the document
    ///
    /// # Returns
    /// * `Result<Delivery>` - Destination and size, or error
    async fn deliver(&mut self, document: &ExportDocument) -> Result<Delivery>;
}

/// Writes the document to a file
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn part_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".part");
        self.path.with_file_name(name)
    }

    async fn write_part(&self, part: &Path, document: &ExportDocument) -> Result<()> {
        let file = File::create(part).await?;
        let mut writer = BufWriter::new(file);
        writer.write_all(document.as_bytes()).await?;
        writer.flush().await?;
        writer.into_inner().sync_all().await?;
        Ok(())
    }
}

/// Check that the target has a file name and an existing parent directory
pub(crate) fn validate_path(path: &Path) -> Result<()> {
    if path.file_name().is_none() {
        return Err(ConfigError::InvalidValue {
            field: "output".to_string(),
            value: path.display().to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(ConfigError::InvalidValue {
                field: "output directory".to_string(),
                value: parent.display().to_string(),
            }
            .into());
        }
    }

    Ok(())
}

#[async_trait]
impl ExportSink for FileSink {
    async fn deliver(&mut self, document: &ExportDocument) -> Result<Delivery> {
        validate_path(&self.path)?;
        let part = self.part_path();

        debug!("Writing {} bytes to {}", document.byte_len(), part.display());

        let written: Result<()> = match self.write_part(&part, document).await {
            Ok(()) => tokio::fs::rename(&part, &self.path).await.map_err(Into::into),
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&part).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to remove {}: {}", part.display(), cleanup);
                }
            }
            return Err(e);
        }

        debug!("Saved {}", self.path.display());
        Ok(Delivery {
            destination: self.path.display().to_string(),
            bytes: document.byte_len() as u64,
        })
    }
}

/// Writes the document to standard output
///
/// The bytes are exactly those a [`FileSink`] would save.
#[derive(Default)]
pub struct StdoutSink;

#[async_trait]
impl ExportSink for StdoutSink {
    async fn deliver(&mut self, document: &ExportDocument) -> Result<Delivery> {
        let mut stdout = tokio::io::stdout();
        let bytes = write_document(&mut stdout, document).await?;
        Ok(Delivery {
            destination: "stdout".to_string(),
            bytes,
        })
    }
}

async fn write_document<W>(writer: &mut W, document: &ExportDocument) -> Result<u64>
where
    W: AsyncWrite + Unpin + Send,
{
    writer.write_all(document.as_bytes()).await?;
    writer.flush().await?;
    Ok(document.byte_len() as u64)
}
