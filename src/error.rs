use std::io;
use std::result;

use thiserror::Error;

/// Error types for PubMed fetch operations
#[derive(Error, Debug)]
pub enum PubMedError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// XML parsing failed
    #[error("XML parsing failed: {0}")]
    XmlError(String),

    /// Non-success HTTP status from an E-utilities endpoint
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// CSV encoding or decoding failed
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// IO error for file operations
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

pub type Result<T> = result::Result<T, PubMedError>;

impl PubMedError {
    /// Whether this failure happened on the wire rather than in the payload.
    ///
    /// Transport failures (connection, timeout, non-2xx status) are recovered
    /// by the pipeline, which logs them and continues with an empty result.
    /// Everything else means the remote answered with something we could not
    /// decode, and is propagated to the caller.
    pub fn is_transport(&self) -> bool {
        match self {
            PubMedError::RequestError(err) => !err.is_decode(),
            PubMedError::ApiError { .. } => true,
            PubMedError::JsonError(_)
            | PubMedError::XmlError(_)
            | PubMedError::CsvError(_)
            | PubMedError::IoError(_) => false,
        }
    }

    /// Short human readable class of the failure, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            PubMedError::RequestError(err) if err.is_timeout() => "timeout",
            PubMedError::RequestError(err) if err.is_connect() => "connection",
            PubMedError::RequestError(_) => "network",
            PubMedError::ApiError { status, .. } => match status {
                429 => "rate limited",
                500..=599 => "server error",
                _ => "client error",
            },
            PubMedError::JsonError(_) => "invalid JSON response",
            PubMedError::XmlError(_) => "invalid XML response",
            PubMedError::CsvError(_) => "csv",
            PubMedError::IoError(_) => "file system",
        }
    }
}
