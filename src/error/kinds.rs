use std::{fmt, io};

/// Crate-wide `Result` type using [`FeedExportError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, FeedExportError>;

/// Top-level error type for feed export operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum FeedExportError {
    /// Feed API errors.
    Api(ApiError),

    /// A fetched record could not be flattened.
    Record(RecordError),

    /// Configuration and input errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// HTTP transport errors.
    Http(reqwest::Error),

    /// JSON or TOML (de)serialization errors.
    Serialization(String),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Errors reported by the remote feed API.
#[derive(Debug)]
pub enum ApiError {
    /// The credential was rejected.
    Unauthorized(String),

    /// The API answered with a non-success status.
    RequestFailed { status: u16, message: String },

    /// The response body did not have the expected shape.
    InvalidResponse(String),
}

/// Errors raised while flattening a fetched record.
#[derive(Debug)]
pub enum RecordError {
    /// A nested attribute the export needs is absent.
    MissingField { hash: String, field: &'static str },
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Missing required field.
    MissingField(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for FeedExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedExportError::Api(e) => write!(f, "Feed API error: {e}"),
            FeedExportError::Record(e) => write!(f, "Malformed record: {e}"),
            FeedExportError::Config(e) => write!(f, "Configuration error: {e}"),
            FeedExportError::Io(e) => write!(f, "I/O error: {e}"),
            FeedExportError::Http(e) => write!(f, "HTTP error: {e}"),
            FeedExportError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            FeedExportError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            ApiError::RequestFailed { status, message } => {
                write!(f, "Request failed with HTTP {status}: {message}")
            }
            ApiError::InvalidResponse(msg) => write!(f, "Invalid response: {msg}"),
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::MissingField { hash, field } => {
                write!(f, "cast '{hash}' has no '{field}'")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::MissingField(field) => write!(f, "Missing required field: {field}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for FeedExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedExportError::Io(e) => Some(e),
            FeedExportError::Http(e) => Some(e),
            _ => None,
        }
    }
}
impl std::error::Error for ApiError {}
impl std::error::Error for RecordError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to FeedExportError ========================= */

impl From<io::Error> for FeedExportError {
    fn from(err: io::Error) -> Self {
        FeedExportError::Io(err)
    }
}

impl From<reqwest::Error> for FeedExportError {
    fn from(err: reqwest::Error) -> Self {
        FeedExportError::Http(err)
    }
}

impl From<serde_json::Error> for FeedExportError {
    fn from(err: serde_json::Error) -> Self {
        FeedExportError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for FeedExportError {
    fn from(err: toml::ser::Error) -> Self {
        FeedExportError::Serialization(err.to_string())
    }
}

impl From<ApiError> for FeedExportError {
    fn from(err: ApiError) -> Self {
        FeedExportError::Api(err)
    }
}

impl From<RecordError> for FeedExportError {
    fn from(err: RecordError) -> Self {
        FeedExportError::Record(err)
    }
}

impl From<ConfigError> for FeedExportError {
    fn from(err: ConfigError) -> Self {
        FeedExportError::Config(err)
    }
}

impl From<String> for FeedExportError {
    fn from(msg: String) -> Self {
        FeedExportError::Generic(msg)
    }
}

impl From<&str> for FeedExportError {
    fn from(msg: &str) -> Self {
        FeedExportError::Generic(msg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_display() {
        let err: FeedExportError = RecordError::MissingField {
            hash: "0xabc".to_string(),
            field: "author.profile.bio",
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Malformed record: cast '0xabc' has no 'author.profile.bio'"
        );
    }

    #[test]
    fn test_api_error_display() {
        let err: FeedExportError = ApiError::RequestFailed {
            status: 400,
            message: "Invalid channel".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Feed API error: Request failed with HTTP 400: Invalid channel"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let err: FeedExportError = ConfigError::MissingField("api key".to_string()).into();
        assert!(matches!(err, FeedExportError::Config(ConfigError::MissingField(_))));
    }
}
