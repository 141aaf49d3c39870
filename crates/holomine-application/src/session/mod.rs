//! Session state held by the application.
//!
//! The store keeps exactly one active session and publishes every transition
//! to its subscribers.

mod store;

pub use store::SessionStore;
