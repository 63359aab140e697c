//! Error types for fetching, transforming, and drawing series.

use crate::models::Category;
use chrono::NaiveDate;
use thiserror::Error;

/// Result alias used across the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Problems found while deriving deltas from a cumulative series.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("no {category} value for {date}")]
    MissingValue { category: Category, date: NaiveDate },
    #[error("{category} delta for {date} overflows")]
    Overflow { category: Category, date: NaiveDate },
}

#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure or timeout.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request failed with HTTP {0}")]
    Http(reqwest::StatusCode),
    /// Error payload (`{"message": ...}`) returned by the API.
    #[error("api error: {0}")]
    Api(String),
    /// Response body is not JSON or lacks the expected timelines.
    #[error("decode error: {0}")]
    Decode(String),
    #[error(transparent)]
    Data(#[from] DataError),
    /// Zero usable points after the transform.
    #[error("no data points to plot")]
    EmptyData,
    #[error("render error: {0}")]
    Render(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
