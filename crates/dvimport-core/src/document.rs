//! Extraction of the citation field list from a Dataverse dataset response.
use crate::error::{Side, VerifyError};
use serde_json::Value;

/// Location of the citation fields inside `GET /api/datasets/:persistentId/`.
pub const CITATION_FIELDS_PATH: [&str; 5] =
    ["data", "latestVersion", "metadataBlocks", "citation", "fields"];

/// Ordered citation fields of one dataset version.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataDocument {
    fields: Vec<Value>,
}

impl MetadataDocument {
    pub fn new(fields: Vec<Value>) -> Self {
        Self { fields }
    }

    /// Pull the field list out of a full dataset response.
    pub fn from_response(response: &Value, side: Side) -> Result<Self, VerifyError> {
        let malformed = || VerifyError::MalformedDocument {
            side,
            path: CITATION_FIELDS_PATH.join("."),
        };

        let mut node = response;
        for key in CITATION_FIELDS_PATH {
            node = node.get(key).ok_or_else(malformed)?;
        }
        let fields = node.as_array().ok_or_else(malformed)?;
        Ok(Self::new(fields.clone()))
    }

    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
