//! Backend service traits.
//!
//! Defines the two external collaborators the workflow depends on. The HTTP
//! implementation lives in `holomine-interaction`; tests substitute their own.
//!
//! # Trust boundary
//!
//! Implementations report what the backend claims (scheme labels, privacy
//! level, patterns). Nothing on the client side verifies that the data was
//! really encrypted or that mining ran on ciphertext.

use crate::contract::{EncryptionResult, MiningRequest, MiningResult};
use crate::error::ServiceError;
use crate::session::DatasetInput;

/// Turns a raw dataset into a ciphertext artifact plus metadata.
#[async_trait::async_trait]
pub trait EncryptionService: Send + Sync {
    /// Uploads `input` and returns the encryption artifact.
    async fn encrypt(&self, input: &DatasetInput) -> Result<EncryptionResult, ServiceError>;
}

/// Runs a mining algorithm over a ciphertext artifact.
#[async_trait::async_trait]
pub trait MiningService: Send + Sync {
    /// Runs `request.algorithm` over `request.encrypted_data`.
    async fn mine(&self, request: &MiningRequest) -> Result<MiningResult, ServiceError>;
}
