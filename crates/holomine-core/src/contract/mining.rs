//! Mining Service request/response contract.

use serde::{Deserialize, Serialize};

use crate::algorithm::MiningAlgorithm;
use crate::error::{ServiceError, ServiceKind};

/// Body of a mining request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiningRequest {
    /// Base64 ciphertext exactly as returned by the Encryption Service.
    pub encrypted_data: String,
    pub algorithm: MiningAlgorithm,
}

impl MiningRequest {
    pub fn new(encrypted_data: impl Into<String>, algorithm: MiningAlgorithm) -> Self {
        Self {
            encrypted_data: encrypted_data.into(),
            algorithm,
        }
    }
}

/// Successful response of the Mining Service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiningResult {
    /// Label of the algorithm that ran, e.g. `K-Means Clustering (Privacy-Preserving)`.
    pub algorithm: String,
    /// Server-side execution time in milliseconds.
    pub execution_time: f64,
    pub privacy_level: String,
    /// Discovered patterns, in the order the service reported them.
    pub patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl MiningResult {
    /// Rejects responses that break the contract.
    ///
    /// An empty pattern list is a service-side violation, not a valid result.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.patterns.is_empty() {
            return Err(ServiceError::contract(
                ServiceKind::Mining,
                "response contained no patterns",
            ));
        }
        Ok(())
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_wire_names() {
        let request = MiningRequest::new("QmFz", MiningAlgorithm::Association);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "encryptedData": "QmFz", "algorithm": "association" })
        );
    }

    #[test]
    fn test_result_accepts_integer_execution_time() {
        let result: MiningResult = serde_json::from_str(
            r#"{
                "algorithm": "K-Means Clustering",
                "executionTime": 42,
                "privacyLevel": "100%",
                "patterns": ["Group 1: ...", "Group 2: ...", "Group 3: ..."]
            }"#,
        )
        .unwrap();
        assert_eq!(result.execution_time, 42.0);
        assert_eq!(result.pattern_count(), 3);
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_empty_patterns_violate_contract() {
        let result = MiningResult {
            algorithm: "Outlier Detection (Encrypted)".to_string(),
            execution_time: 1.0,
            privacy_level: "High".to_string(),
            patterns: Vec::new(),
            timestamp: None,
        };
        let err = result.validate().unwrap_err();
        assert!(err.is_contract_violation());
        assert_eq!(err.service(), ServiceKind::Mining);
    }
}
