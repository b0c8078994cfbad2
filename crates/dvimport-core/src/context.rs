//! Verification Context: per-request identity carried through logging
use tracing::Span;

#[derive(Debug, Clone)]
pub struct VerificationContext {
    pub trace_id: String,
    pub doi: String,
}

impl VerificationContext {
    pub fn new(doi: impl Into<String>) -> Self {
        Self {
            trace_id: uuid::Uuid::new_v4().to_string(),
            doi: doi.into(),
        }
    }

    /// Span that scopes every log line of one verification.
    pub fn span(&self) -> Span {
        tracing::info_span!("verify", trace_id = %self.trace_id, doi = %self.doi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_ids_are_unique() {
        let a = VerificationContext::new("doi:1");
        let b = VerificationContext::new("doi:1");
        assert_ne!(a.trace_id, b.trace_id);
        assert_eq!(a.doi, "doi:1");
    }
}
