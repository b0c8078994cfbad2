//! dvimport core: order-insensitive verification of imported Dataverse metadata.
//!
//! Decides whether the citation metadata of a dataset in a destination
//! Dataverse matches the source record, ignoring fields expected to differ
//! and the ordering of keys and list elements.
//!
//! # Example
//!
//! ```
//! use dvimport_core::compare_metadata;
//! use serde_json::json;
//!
//! let source = vec![
//!     json!({"typeName": "title", "value": "X"}),
//!     json!({"typeName": "datasetContact", "value": "A"}),
//! ];
//! let destination = vec![
//!     json!({"typeName": "datasetContact", "value": "B"}),
//!     json!({"typeName": "title", "value": "X"}),
//! ];
//! assert!(compare_metadata(&source, &destination).unwrap());
//! ```

pub mod canon;
pub mod compare;
pub mod context;
pub mod data_model;
pub mod document;
pub mod error;
pub mod filter;
pub mod verify;

pub use canon::{canonicalize, CanonicalValue};
pub use compare::{compare_metadata, Comparator};
pub use context::VerificationContext;
pub use data_model::{DataverseInformation, ErrorBody, MatchBody, VerifyRequest};
pub use document::MetadataDocument;
pub use error::{FetchError, Side, VerifyError};
pub use filter::{filter_fields, ExclusionSet, DEFAULT_EXCLUDED_FIELDS};
pub use verify::{MetadataFetcher, VerificationOutcome, Verifier};

/// Version of the verification engine
pub const DVIMPORT_VERSION: &str = env!("CARGO_PKG_VERSION");
