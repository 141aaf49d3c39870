//! Error types for the Holomine workflow.
//!
//! Two layers are modelled here:
//!
//! - [`ServiceError`]: anything that went wrong while talking to the
//!   Encryption Service or the Mining Service (HTTP status, transport,
//!   timeout, malformed response).
//! - [`WorkflowError`]: what a caller of the workflow controller sees. Usage
//!   errors (`Precondition`, `InvalidArgument`) and the informational `Busy`
//!   rejection never change session state; `Service` is the only variant that
//!   drives a session into `Failed`.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::Stage;

/// The external collaborator a [`ServiceError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Encryption,
    Mining,
    Health,
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKind::Encryption => write!(f, "encryption service"),
            ServiceKind::Mining => write!(f, "mining service"),
            ServiceKind::Health => write!(f, "health endpoint"),
        }
    }
}

/// A failed call to one of the backend services.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service answered with a non-success status.
    #[error("{service} returned HTTP {status}: {message}")]
    Http {
        service: ServiceKind,
        status: u16,
        message: String,
    },

    /// The request never produced a response (DNS, connect, reset, ...).
    #[error("{service} request failed: {message}")]
    Transport {
        service: ServiceKind,
        message: String,
    },

    /// No response within the configured deadline.
    #[error("{service} timed out after {}ms", .after.as_millis())]
    Timeout {
        service: ServiceKind,
        after: Duration,
    },

    /// The service answered with success but the body breaks the contract
    /// (undecodable JSON, empty pattern list, ...).
    #[error("{service} violated its response contract: {message}")]
    Contract {
        service: ServiceKind,
        message: String,
    },
}

impl ServiceError {
    pub fn http(service: ServiceKind, status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            service,
            status,
            message: message.into(),
        }
    }

    pub fn transport(service: ServiceKind, message: impl Into<String>) -> Self {
        Self::Transport {
            service,
            message: message.into(),
        }
    }

    pub fn timeout(service: ServiceKind, after: Duration) -> Self {
        Self::Timeout { service, after }
    }

    pub fn contract(service: ServiceKind, message: impl Into<String>) -> Self {
        Self::Contract {
            service,
            message: message.into(),
        }
    }

    /// Which backend produced this error.
    pub fn service(&self) -> ServiceKind {
        match self {
            Self::Http { service, .. }
            | Self::Transport { service, .. }
            | Self::Timeout { service, .. }
            | Self::Contract { service, .. } => *service,
        }
    }

    /// HTTP status, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Contract { .. })
    }
}

/// The operation a precondition check was guarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Encrypt,
    Mine,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Encrypt => write!(f, "encrypt"),
            Operation::Mine => write!(f, "mine"),
        }
    }
}

/// Errors surfaced by workflow operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// The operation is not allowed in the current stage.
    #[error("cannot {operation}: {message}")]
    Precondition {
        operation: Operation,
        message: String,
    },

    /// The caller passed an identifier the workflow does not know.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A backend call failed; the session is now `Failed`.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Another request is still outstanding for this session.
    #[error("busy: a request is already in flight (stage: {stage})")]
    Busy { stage: Stage },
}

impl WorkflowError {
    pub fn precondition(operation: Operation, message: impl Into<String>) -> Self {
        Self::Precondition {
            operation,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn busy(stage: Stage) -> Self {
        Self::Busy { stage }
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service(_))
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }
}

/// A type alias for `Result<T, WorkflowError>`.
pub type Result<T> = std::result::Result<T, WorkflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_accessors() {
        let err = ServiceError::http(ServiceKind::Encryption, 500, "boom");
        assert_eq!(err.service(), ServiceKind::Encryption);
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_timeout());

        let err = ServiceError::timeout(ServiceKind::Mining, Duration::from_millis(1500));
        assert_eq!(err.status(), None);
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "mining service timed out after 1500ms");
    }

    #[test]
    fn test_workflow_error_display() {
        let err = WorkflowError::precondition(Operation::Mine, "no encrypted data");
        assert_eq!(err.to_string(), "cannot mine: no encrypted data");
        assert!(err.is_precondition());

        let err = WorkflowError::busy(Stage::Encrypting);
        assert!(err.is_busy());
        assert_eq!(
            err.to_string(),
            "busy: a request is already in flight (stage: encrypting)"
        );
    }

    #[test]
    fn test_service_error_converts_into_workflow_error() {
        let err: WorkflowError =
            ServiceError::contract(ServiceKind::Mining, "empty patterns").into();
        assert!(err.is_service());
        assert_eq!(
            err.to_string(),
            "mining service violated its response contract: empty patterns"
        );
    }
}
