//! Wire contract with the backend services.
//!
//! # Module Structure
//!
//! - `encryption`: Encryption Service response (`EncryptionResult`)
//! - `mining`: Mining Service request/response (`MiningRequest`, `MiningResult`)
//! - `health`: health endpoint and error body shapes

mod encryption;
mod health;
mod mining;

pub use encryption::{EncryptionResult, SESSION_ID_PREVIEW_LEN};
pub use health::{ErrorBody, ServiceHealth};
pub use mining::{MiningRequest, MiningResult};
