//! Data Model: VerifyRequest, DataverseInformation, response bodies
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    /// Persistent identifier shared by both records (ex: "doi:10.5072/FK2/ABCDEF")
    pub doi: String,
    pub dataverse_information: DataverseInformation,
}

/// Where to find the two catalogs and how to authenticate against them.
#[derive(Clone, Serialize, Deserialize)]
pub struct DataverseInformation {
    /// Base URL of the source installation (ex: "https://portal.odissei.nl")
    pub source_url: String,
    pub source_api_token: String,
    /// Base URL of the destination installation
    pub destination_url: String,
    pub destination_api_token: String,
}

// Tokens stay out of logs.
impl std::fmt::Debug for DataverseInformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataverseInformation")
            .field("source_url", &self.source_url)
            .field("source_api_token", &"<redacted>")
            .field("destination_url", &self.destination_url)
            .field("destination_api_token", &"<redacted>")
            .finish()
    }
}

/// Body returned when the records match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchBody {
    pub message: String,
}

/// Body returned for every client-facing failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes() {
        let raw = r#"{
            "doi": "doi:10.5072/FK2/ABC",
            "dataverse_information": {
                "source_url": "https://source.example",
                "source_api_token": "s-token",
                "destination_url": "https://dest.example",
                "destination_api_token": "d-token"
            }
        }"#;
        let req: VerifyRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.doi, "doi:10.5072/FK2/ABC");
        assert_eq!(req.dataverse_information.destination_url, "https://dest.example");
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let info = DataverseInformation {
            source_url: "https://a".to_string(),
            source_api_token: "secret-1".to_string(),
            destination_url: "https://b".to_string(),
            destination_api_token: "secret-2".to_string(),
        };
        let printed = format!("{:?}", info);
        assert!(!printed.contains("secret-1"));
        assert!(!printed.contains("secret-2"));
        assert!(printed.contains("https://a"));
    }
}
