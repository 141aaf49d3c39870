//! Backend interaction layer for Holomine.
//!
//! Provides the HTTP implementation of the `EncryptionService` and
//! `MiningService` traits defined in `holomine-core`.

pub mod backend_client;

pub use backend_client::BackendClient;
