//! Assembly of flattened rows into one CSV document

use crate::error::Result;
use crate::feed::FeedRecord;

use super::encoder::Cell;
use super::flatten::{HEADERS, flatten};

/// A finished CSV document, ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    content: String,
    rows: usize,
}

impl ExportDocument {
    /// Flatten every cast and assemble the document
    ///
    /// Stops at the first cast that cannot be flattened; no document is
    /// produced in that case.
    pub fn from_records(records: &[FeedRecord]) -> Result<Self> {
        let rows = records.iter().map(flatten).collect::<Result<Vec<_>>>()?;
        Ok(Self {
            content: serialize(&HEADERS, &rows),
            rows: rows.len(),
        })
    }

    /// Document text
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Document bytes (UTF-8)
    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }

    /// Number of data rows, not counting the header
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Size of the document in bytes
    pub fn byte_len(&self) -> usize {
        self.content.len()
    }
}

/// Join a header row and encoded data rows into one document
///
/// Header names are written as-is, cells go through [`Cell::encode_into`].
/// Rows are separated by `\n` with no trailing newline.
pub fn serialize<R: AsRef<[Cell]>>(headers: &[&str], rows: &[R]) -> String {
    let mut out = headers.join(",");
    for row in rows {
        out.push('\n');
        for (i, cell) in row.as_ref().iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            cell.encode_into(&mut out);
        }
    }
    out
}
