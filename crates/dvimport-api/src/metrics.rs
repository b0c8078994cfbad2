//! Prometheus registry and verification counters served on `/metrics`.
use dvimport_core::VerificationOutcome;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    verifications: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let verifications = IntCounterVec::new(
            Opts::new("dvimport_verifications_total", "Verifications by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(verifications.clone()))?;
        Ok(Self {
            registry,
            verifications,
        })
    }

    pub fn record(&self, outcome: &VerificationOutcome) {
        self.verifications
            .with_label_values(&[outcome.label()])
            .inc();
    }

    pub fn count(&self, label: &str) -> u64 {
        self.verifications.with_label_values(&[label]).get()
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_by_outcome() {
        let metrics = Metrics::new().unwrap();
        metrics.record(&VerificationOutcome::Match);
        metrics.record(&VerificationOutcome::Match);
        metrics.record(&VerificationOutcome::FetchFailure);
        assert_eq!(metrics.count("match"), 2);
        assert_eq!(metrics.count("fetch_failure"), 1);
        assert_eq!(metrics.count("mismatch"), 0);

        let text = metrics.encode().unwrap();
        assert!(text.contains(r#"dvimport_verifications_total{outcome="match"} 2"#));
    }
}
