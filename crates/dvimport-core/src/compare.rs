//! Comparator: filter, canonicalize, compare.
use crate::canon::{canonicalize, CanonicalValue};
use crate::document::MetadataDocument;
use crate::error::VerifyError;
use crate::filter::{filter_fields, ExclusionSet};
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct Comparator {
    exclusions: ExclusionSet,
}

impl Comparator {
    pub fn new(exclusions: ExclusionSet) -> Self {
        Self { exclusions }
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Canonical form of a field list after exclusions are applied.
    pub fn normalize(&self, fields: &[Value]) -> Result<CanonicalValue, VerifyError> {
        let kept = filter_fields(fields, &self.exclusions)?;
        Ok(canonicalize(&Value::Array(kept)))
    }

    /// True when both documents carry the same citation metadata.
    pub fn compare(
        &self,
        source: &MetadataDocument,
        destination: &MetadataDocument,
    ) -> Result<bool, VerifyError> {
        self.compare_fields(source.fields(), destination.fields())
    }

    pub fn compare_fields(&self, source: &[Value], destination: &[Value]) -> Result<bool, VerifyError> {
        let source = self.normalize(source)?;
        let destination = self.normalize(destination)?;
        let matches = source == destination;

        tracing::debug!(
            source_digest = %source.digest(),
            destination_digest = %destination.digest(),
            matches,
            "compared citation metadata"
        );
        if !matches {
            tracing::trace!(%source, %destination, "canonical forms differ");
        }

        Ok(matches)
    }
}

/// Compare two field lists with the default exclusion set.
pub fn compare_metadata(source: &[Value], destination: &[Value]) -> Result<bool, VerifyError> {
    Comparator::default().compare_fields(source, destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_excluded_fields_do_not_matter() {
        let source = vec![
            json!({"typeName": "title", "value": "X"}),
            json!({"typeName": "datasetContact", "value": "A"}),
        ];
        let destination = vec![
            json!({"typeName": "datasetContact", "value": "B"}),
            json!({"typeName": "title", "value": "X"}),
        ];
        assert!(compare_metadata(&source, &destination).unwrap());
    }

    #[test]
    fn test_value_change_is_a_mismatch() {
        let source = vec![json!({"typeName": "title", "value": "X"})];
        let destination = vec![json!({"typeName": "title", "value": "Y"})];
        assert!(!compare_metadata(&source, &destination).unwrap());
    }

    #[test]
    fn test_missing_field_is_a_mismatch() {
        let source = vec![
            json!({"typeName": "title", "value": "X"}),
            json!({"typeName": "subject", "value": ["Other"]}),
        ];
        let destination = vec![json!({"typeName": "title", "value": "X"})];
        assert!(!compare_metadata(&source, &destination).unwrap());
    }

    #[test]
    fn test_compare_is_symmetric() {
        let a = vec![
            json!({"typeName": "title", "value": "X"}),
            json!({"typeName": "keyword", "value": [{"keywordValue": {"value": "k1"}}]}),
        ];
        let b = vec![json!({"typeName": "title", "value": "X"})];
        let cmp = Comparator::default();
        assert_eq!(cmp.compare_fields(&a, &b).unwrap(), cmp.compare_fields(&b, &a).unwrap());
        assert!(cmp.compare_fields(&a, &a).unwrap());
    }

    #[test]
    fn test_configured_exclusions_are_used() {
        let source = vec![
            json!({"typeName": "title", "value": "X"}),
            json!({"typeName": "productionDate", "value": "2020"}),
        ];
        let destination = vec![
            json!({"typeName": "title", "value": "X"}),
            json!({"typeName": "productionDate", "value": "2021"}),
        ];
        assert!(!compare_metadata(&source, &destination).unwrap());

        let cmp = Comparator::new(ExclusionSet::new(["productionDate"]));
        assert!(cmp.compare_fields(&source, &destination).unwrap());
    }

    #[test]
    fn test_malformed_field_propagates() {
        let source = vec![json!({"value": "X"})];
        let destination = vec![json!({"typeName": "title", "value": "X"})];
        assert!(matches!(
            compare_metadata(&source, &destination),
            Err(VerifyError::MalformedField { index: 0, .. })
        ));
    }
}
