use std::{fmt, io};

use arrow_schema::ArrowError;
use parquet::errors::ParquetError;

/// Errors raised while talking to the API gateway.
#[derive(Debug)]
pub enum ApiError {
    /// Connection, status or JSON decoding failure from `reqwest`.
    Http(reqwest::Error),
    /// A login endpoint answered with a code other than 200.
    Remote { code: i64, message: String },
    /// A login response lacked a required field.
    MissingField(&'static str),
    /// The cookie jar could not be read, written or updated.
    Cookie(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Http(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http(e) => write!(f, "request failed: {}", e),
            ApiError::Remote { code, message } => write!(f, "{} (code {})", message, code),
            ApiError::MissingField(field) => write!(f, "response is missing `{}`", field),
            ApiError::Cookie(e) => write!(f, "cookie store error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

/// Errors raised while reading or writing the JSON files under the data
/// directory (caches and stage snapshots).
#[derive(Debug)]
pub enum StoreError {
    IoError(io::Error),
    SerdeError(serde_json::Error),
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::IoError(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::SerdeError(err)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::IoError(e) => write!(f, "io error: {}", e),
            StoreError::SerdeError(e) => write!(f, "invalid json: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors raised while writing a table to Parquet.
#[derive(Debug)]
pub enum ExportError {
    IoError(io::Error),
    ArrowError(ArrowError),
    ParquetError(ParquetError),
    /// The named table has columns of different lengths.
    Misaligned(&'static str),
}

impl From<io::Error> for ExportError {
    fn from(err: io::Error) -> Self {
        ExportError::IoError(err)
    }
}

impl From<ArrowError> for ExportError {
    fn from(err: ArrowError) -> Self {
        ExportError::ArrowError(err)
    }
}

impl From<ParquetError> for ExportError {
    fn from(err: ParquetError) -> Self {
        ExportError::ParquetError(err)
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::IoError(e) => write!(f, "io error: {}", e),
            ExportError::ArrowError(e) => write!(f, "arrow error: {}", e),
            ExportError::ParquetError(e) => write!(f, "parquet error: {}", e),
            ExportError::Misaligned(table) => {
                write!(f, "table `{}` has columns of different lengths", table)
            }
        }
    }
}

impl std::error::Error for ExportError {}

#[derive(Debug)]
pub enum LoginError {
    Api(ApiError),
    /// A pending session was stepped without a QR key.
    MissingKey,
}

impl From<ApiError> for LoginError {
    fn from(err: ApiError) -> Self {
        LoginError::Api(err)
    }
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::Api(e) => write!(f, "{}", e),
            LoginError::MissingKey => write!(f, "pending login session has no QR key"),
        }
    }
}

impl std::error::Error for LoginError {}
