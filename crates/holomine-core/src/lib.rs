//! Domain layer for Holomine.
//!
//! Holds the session aggregate and its stage machine, the wire contract with
//! the Encryption and Mining services, the service traits the workflow
//! consumes, and the pattern explanation tables.

pub mod algorithm;
pub mod config;
pub mod contract;
pub mod error;
pub mod explain;
pub mod service;
pub mod session;

pub use algorithm::MiningAlgorithm;
pub use error::{Operation, ServiceError, ServiceKind, WorkflowError};
pub use explain::{AlgorithmCategory, ExplainedPattern, explain, explain_result};
pub use service::{EncryptionService, MiningService};
pub use session::{DatasetInput, Session, Stage};
