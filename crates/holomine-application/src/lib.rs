//! Application layer for Holomine.
//!
//! Coordinates the session store with the backend services: the workflow
//! controller is the only component that mutates the active session.

pub mod session;
pub mod workflow;

pub use session::SessionStore;
pub use workflow::{Completion, WorkflowController};
