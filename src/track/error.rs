use thiserror::Error;

use crate::geo::ConvertError;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing column {0}")]
    MissingColumn(&'static str),
    #[error("row {row}: missing value for {field}")]
    MissingField { row: usize, field: &'static str },
    #[error("row {row}: {source}")]
    InvalidCoordinate {
        row: usize,
        #[source]
        source: ConvertError,
    },
    #[error("load task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
