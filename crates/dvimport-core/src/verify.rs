//! Verification Orchestrator: fetch both records, compare, map to an outcome.
use crate::compare::Comparator;
use crate::context::VerificationContext;
use crate::data_model::VerifyRequest;
use crate::document::MetadataDocument;
use crate::error::{FetchError, Side, VerifyError};
use serde_json::Value;
use std::future::Future;
use tracing::Instrument;

pub const MATCH_MESSAGE: &str = "Metadata matches.";
pub const MISMATCH_MESSAGE: &str = "Source and destination json do not match.";
pub const FETCH_FAILURE_MESSAGE: &str = "Unable to retrieve json from source or destination dataverse.";

/// Retrieves the dataset document for `identifier` from one catalog.
pub trait MetadataFetcher: Send + Sync {
    fn fetch(
        &self,
        base_url: &str,
        api_token: &str,
        identifier: &str,
    ) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// Terminal state of one verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Match,
    Mismatch,
    FetchFailure,
    /// A fetched document did not have the expected structure.
    Malformed(VerifyError),
}

impl VerificationOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, VerificationOutcome::Match)
    }

    /// HTTP status class the outcome maps onto.
    pub fn status_code(&self) -> u16 {
        match self {
            VerificationOutcome::Match => 200,
            _ => 422,
        }
    }

    pub fn message(&self) -> String {
        match self {
            VerificationOutcome::Match => MATCH_MESSAGE.to_string(),
            VerificationOutcome::Mismatch => MISMATCH_MESSAGE.to_string(),
            VerificationOutcome::FetchFailure => FETCH_FAILURE_MESSAGE.to_string(),
            VerificationOutcome::Malformed(err) => {
                format!("Source or destination json is malformed: {}", err)
            }
        }
    }

    /// Short label used for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            VerificationOutcome::Match => "match",
            VerificationOutcome::Mismatch => "mismatch",
            VerificationOutcome::FetchFailure => "fetch_failure",
            VerificationOutcome::Malformed(_) => "malformed",
        }
    }
}

pub struct Verifier<F> {
    fetcher: F,
    comparator: Comparator,
}

impl<F: MetadataFetcher> Verifier<F> {
    pub fn new(fetcher: F, comparator: Comparator) -> Self {
        Self { fetcher, comparator }
    }

    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Verify that the destination record matches the source record.
    pub async fn verify(&self, request: &VerifyRequest) -> VerificationOutcome {
        let ctx = VerificationContext::new(request.doi.as_str());
        let outcome = self.run(request).instrument(ctx.span()).await;
        tracing::info!(
            trace_id = %ctx.trace_id,
            doi = %ctx.doi,
            outcome = outcome.label(),
            "verification finished"
        );
        outcome
    }

    async fn run(&self, request: &VerifyRequest) -> VerificationOutcome {
        let info = &request.dataverse_information;
        let (source, destination) = tokio::join!(
            self.fetcher
                .fetch(&info.source_url, &info.source_api_token, &request.doi),
            self.fetcher
                .fetch(&info.destination_url, &info.destination_api_token, &request.doi),
        );

        let (source, destination) = match (source, destination) {
            (Ok(source), Ok(destination)) => (source, destination),
            (source, destination) => {
                if let Err(err) = &source {
                    tracing::warn!(side = %Side::Source, error = %err, "fetch failed");
                }
                if let Err(err) = &destination {
                    tracing::warn!(side = %Side::Destination, error = %err, "fetch failed");
                }
                return VerificationOutcome::FetchFailure;
            }
        };

        match self.compare_documents(&source, &destination) {
            Ok(true) => VerificationOutcome::Match,
            Ok(false) => VerificationOutcome::Mismatch,
            Err(err) => {
                tracing::warn!(error = %err, "malformed metadata document");
                VerificationOutcome::Malformed(err)
            }
        }
    }

    fn compare_documents(&self, source: &Value, destination: &Value) -> Result<bool, VerifyError> {
        let source = MetadataDocument::from_response(source, Side::Source)?;
        let destination = MetadataDocument::from_response(destination, Side::Destination)?;
        tracing::debug!(
            source_fields = source.len(),
            destination_fields = destination.len(),
            "extracted citation fields"
        );
        self.comparator.compare(&source, &destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_status_and_messages() {
        assert!(VerificationOutcome::Match.is_match());
        assert!(!VerificationOutcome::Mismatch.is_match());
        assert_eq!(VerificationOutcome::Match.status_code(), 200);
        assert_eq!(VerificationOutcome::Mismatch.status_code(), 422);
        assert_eq!(VerificationOutcome::FetchFailure.status_code(), 422);
        assert_eq!(VerificationOutcome::Match.message(), "Metadata matches.");
        assert_eq!(
            VerificationOutcome::FetchFailure.message(),
            "Unable to retrieve json from source or destination dataverse."
        );

        let malformed = VerificationOutcome::Malformed(VerifyError::MalformedField {
            index: 3,
            reason: "missing `typeName`".to_string(),
        });
        assert_eq!(malformed.status_code(), 422);
        assert!(malformed.message().contains("FIELD/3"));
        assert_eq!(malformed.label(), "malformed");
    }
}
