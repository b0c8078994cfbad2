//! Unified Error Model
use thiserror::Error;

/// Which catalog a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Destination,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Destination => write!(f, "destination"),
        }
    }
}

/// Structural errors raised while reading metadata documents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("DOCUMENT/{side}: missing or invalid `{path}`")]
    MalformedDocument { side: Side, path: String },

    #[error("FIELD/{index}: {reason}")]
    MalformedField { index: usize, reason: String },
}

/// Failure to retrieve a metadata document from a catalog.
///
/// The orchestrator never inspects the variant; it only distinguishes
/// success from failure. Variants exist for logging.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("FETCH/TRANSPORT: {0}")]
    Transport(String),

    #[error("FETCH/STATUS: {status} from {url}")]
    Status { status: u16, url: String },

    #[error("FETCH/DECODE: {0}")]
    Decode(String),

    #[error("FETCH/URL: {0}")]
    InvalidUrl(String),
}
