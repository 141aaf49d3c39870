//! Mining algorithm identifiers accepted by the Mining Service.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::WorkflowError;
use crate::explain::AlgorithmCategory;

/// One of the fixed set of mining algorithms the backend runs.
///
/// The wire identifier is the lowercase variant name
/// (`"clustering"`, `"association"`, `"classification"`, `"outlier"`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MiningAlgorithm {
    Clustering,
    Association,
    Classification,
    Outlier,
}

impl MiningAlgorithm {
    /// Parses a wire identifier, rejecting anything outside the fixed set.
    pub fn parse(identifier: &str) -> Result<Self, WorkflowError> {
        identifier.parse().map_err(|_| {
            WorkflowError::invalid_argument(format!(
                "unknown mining algorithm '{}' (expected one of: {})",
                identifier,
                Self::identifiers().join(", ")
            ))
        })
    }

    /// The wire identifiers of every algorithm, in menu order.
    pub fn identifiers() -> Vec<&'static str> {
        Self::iter().map(|a| a.as_wire()).collect()
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            MiningAlgorithm::Clustering => "clustering",
            MiningAlgorithm::Association => "association",
            MiningAlgorithm::Classification => "classification",
            MiningAlgorithm::Outlier => "outlier",
        }
    }

    /// Human-readable title used in menus.
    pub fn title(self) -> &'static str {
        match self {
            MiningAlgorithm::Clustering => "K-Means Clustering",
            MiningAlgorithm::Association => "Association Rules",
            MiningAlgorithm::Classification => "Classification",
            MiningAlgorithm::Outlier => "Outlier Detection",
        }
    }

    /// One-line description shown next to the algorithm in menus.
    pub fn description(self) -> &'static str {
        match self {
            MiningAlgorithm::Clustering => {
                "Group similar data points while preserving privacy using homomorphic clustering"
            }
            MiningAlgorithm::Association => {
                "Discover relationships between data items securely without exposing values"
            }
            MiningAlgorithm::Classification => {
                "Classify data into categories with complete privacy preservation"
            }
            MiningAlgorithm::Outlier => {
                "Identify anomalies without exposing sensitive data using statistical methods"
            }
        }
    }

    /// The explanation category results of this algorithm are expected to fall in.
    pub fn category(self) -> AlgorithmCategory {
        match self {
            MiningAlgorithm::Clustering => AlgorithmCategory::Clustering,
            MiningAlgorithm::Association => AlgorithmCategory::Association,
            MiningAlgorithm::Classification => AlgorithmCategory::Classification,
            MiningAlgorithm::Outlier => AlgorithmCategory::Outlier,
        }
    }
}
