//! Scalar cell encoding for CSV rows

use std::borrow::Cow;

/// One scalar value of a flattened row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Number(u64),
    Bool(bool),
    Null,
}

impl Cell {
    /// Encode the cell as a CSV token
    ///
    /// Text is always wrapped in double quotes with embedded quotes doubled;
    /// commas and line breaks are left as-is inside the quotes. Numbers and
    /// booleans are written bare, and an absent value becomes `null`.
    pub fn encode(&self) -> Cow<'_, str> {
        match self {
            Cell::Text(text) => Cow::Owned(quote(text)),
            Cell::Number(n) => Cow::Owned(n.to_string()),
            Cell::Bool(true) => Cow::Borrowed("true"),
            Cell::Bool(false) => Cow::Borrowed("false"),
            Cell::Null => Cow::Borrowed("null"),
        }
    }

    /// Append the encoded token to `out`
    pub fn encode_into(&self, out: &mut String) {
        out.push_str(&self.encode());
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        Cell::Number(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}
