//! Session domain module.
//!
//! This module contains the session aggregate and the workflow stage machine.
//!
//! # Module Structure
//!
//! - `stage`: Workflow stages (`Stage`)
//! - `input`: User-selected dataset (`DatasetInput`)
//! - `model`: Core session value and its transitions (`Session`)
//!
//! # Usage
//!
//! ```ignore
//! use holomine_core::session::{DatasetInput, Session, Stage};
//! ```

mod input;
mod model;
mod stage;

// Re-export public API
pub use input::DatasetInput;
pub use model::{Failure, MiningRun, RequestToken, Session};
pub use stage::Stage;
