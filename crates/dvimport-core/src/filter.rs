//! Field filtering: drops citation fields that legitimately differ
//! between source and destination (contact details, metadata language).

use crate::error::VerifyError;
use serde_json::Value;
use std::collections::BTreeSet;

/// Field names excluded from comparison unless configured otherwise.
pub const DEFAULT_EXCLUDED_FIELDS: [&str; 2] = ["metadataLanguage", "datasetContact"];

/// Immutable set of `typeName`s that never take part in a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.names.contains(type_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_FIELDS)
    }
}

/// Read the `typeName` of one field.
pub fn type_name(field: &Value, index: usize) -> Result<&str, VerifyError> {
    let object = field.as_object().ok_or_else(|| VerifyError::MalformedField {
        index,
        reason: "field is not an object".to_string(),
    })?;
    match object.get("typeName") {
        Some(Value::String(name)) => Ok(name),
        Some(_) => Err(VerifyError::MalformedField {
            index,
            reason: "`typeName` is not a string".to_string(),
        }),
        None => Err(VerifyError::MalformedField {
            index,
            reason: "missing `typeName`".to_string(),
        }),
    }
}

/// Keep every field whose `typeName` is not excluded, in input order.
pub fn filter_fields(fields: &[Value], exclusions: &ExclusionSet) -> Result<Vec<Value>, VerifyError> {
    let mut kept = Vec::with_capacity(fields.len());
    for (index, field) in fields.iter().enumerate() {
        if !exclusions.contains(type_name(field, index)?) {
            kept.push(field.clone());
        }
    }
    Ok(kept)
}
