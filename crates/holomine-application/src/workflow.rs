//! Workflow controller.
//!
//! Drives a [`Session`] through upload, encryption and mining. The controller
//! is the only writer of the [`SessionStore`]; every outcome of a backend
//! call is applied as one atomic transition.
//!
//! At most one request is outstanding per session. A second `encrypt`/`mine`
//! while one is in flight is rejected with `Busy`. Selecting a new input or
//! resetting does not cancel the network call, but its response is dropped
//! when it arrives ([`Completion::Superseded`]).

use crate::session::SessionStore;
use holomine_core::contract::{EncryptionResult, MiningResult};
use holomine_core::error::{Operation, ServiceError, ServiceKind, WorkflowError};
use holomine_core::service::{EncryptionService, MiningService};
use holomine_core::session::{DatasetInput, RequestToken, Session};
use holomine_core::MiningAlgorithm;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of a request that was dispatched.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion<T> {
    /// The response was applied to the session.
    Applied(T),
    /// The session moved on (new input or reset) before the response arrived;
    /// the response was discarded.
    Superseded,
}

impl<T> Completion<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            Completion::Applied(value) => Some(value),
            Completion::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Completion::Superseded)
    }
}

pub struct WorkflowController {
    store: Arc<SessionStore>,
    encryption: Arc<dyn EncryptionService>,
    mining: Arc<dyn MiningService>,
    timeout: Duration,
}

impl WorkflowController {
    /// Creates a controller.
    ///
    /// `timeout` bounds every individual call to either service.
    pub fn new(
        store: Arc<SessionStore>,
        encryption: Arc<dyn EncryptionService>,
        mining: Arc<dyn MiningService>,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            encryption,
            mining,
            timeout,
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub async fn snapshot(&self) -> Arc<Session> {
        self.store.snapshot().await
    }

    /// Stores `input` and moves to `Uploaded`, clearing earlier results.
    ///
    /// Permitted in every stage. A request still in flight is superseded.
    pub async fn select_input(&self, input: DatasetInput) -> Arc<Session> {
        tracing::info!(
            file_name = %input.file_name(),
            bytes = input.len(),
            "[WorkflowController] Input selected"
        );
        self.store.replace(|session| session.with_input(input)).await
    }

    /// Returns to `Idle`, dropping every artifact.
    pub async fn reset(&self) -> Arc<Session> {
        tracing::info!("[WorkflowController] Session reset");
        self.store.replace(Session::reset).await
    }

    /// Sends the selected input to the Encryption Service.
    ///
    /// # Errors
    ///
    /// - `Busy` if a request is already in flight
    /// - `Precondition` unless the session is `Uploaded` or a retryable `Failed`
    /// - `Service` if the call failed; the session is then `Failed`
    pub async fn encrypt(&self) -> Result<Completion<EncryptionResult>, WorkflowError> {
        let sequence = self.store.next_sequence();
        let (token, input) = self
            .store
            .transition(|session| {
                let (next, token) = session.begin_encrypt(sequence)?;
                let input = next.input().cloned().ok_or_else(|| {
                    WorkflowError::precondition(Operation::Encrypt, "no input selected")
                })?;
                Ok::<_, WorkflowError>((next, (token, input)))
            })
            .await?;

        tracing::debug!(
            generation = token.generation,
            sequence = token.sequence,
            file_name = %input.file_name(),
            "[WorkflowController] Encryption request dispatched"
        );

        let outcome = self
            .bounded(ServiceKind::Encryption, self.encryption.encrypt(&input))
            .await;

        match outcome {
            Ok(result) => {
                let applied = self
                    .store
                    .apply(|session| session.encrypted(token, result.clone()))
                    .await;
                if !applied {
                    return Ok(self.superseded(Operation::Encrypt, token));
                }
                tracing::info!(
                    algorithm = %result.algorithm,
                    key_size = result.key_size,
                    record_count = result.record_count,
                    session = %result.session_id_preview(),
                    "[WorkflowController] Dataset encrypted"
                );
                Ok(Completion::Applied(result))
            }
            Err(error) => self.fail(Operation::Encrypt, token, error).await,
        }
    }

    /// Runs `algorithm` over the current encryption artifact.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for an unknown algorithm identifier
    /// - `Busy` if a request is already in flight
    /// - `Precondition` when nothing has been encrypted successfully
    /// - `Service` if the call failed or returned no patterns; the session is
    ///   then `Failed` with the encryption retained
    pub async fn mine(&self, algorithm: &str) -> Result<Completion<MiningResult>, WorkflowError> {
        let algorithm = MiningAlgorithm::parse(algorithm)?;
        let sequence = self.store.next_sequence();
        let (token, request) = self
            .store
            .transition(|session| {
                let (next, token, request) = session.begin_mining(algorithm, sequence)?;
                Ok::<_, WorkflowError>((next, (token, request)))
            })
            .await?;

        tracing::debug!(
            generation = token.generation,
            sequence = token.sequence,
            algorithm = %algorithm,
            ciphertext_len = request.encrypted_data.len(),
            "[WorkflowController] Mining request dispatched"
        );

        let outcome = self
            .bounded(ServiceKind::Mining, self.mining.mine(&request))
            .await
            .and_then(|result| result.validate().map(|()| result));

        match outcome {
            Ok(result) => {
                let applied = self
                    .store
                    .apply(|session| session.mined(token, algorithm, result.clone()))
                    .await;
                if !applied {
                    return Ok(self.superseded(Operation::Mine, token));
                }
                tracing::info!(
                    algorithm = %result.algorithm,
                    patterns = result.pattern_count(),
                    execution_time_ms = result.execution_time,
                    "[WorkflowController] Mining complete"
                );
                Ok(Completion::Applied(result))
            }
            Err(error) => self.fail(Operation::Mine, token, error).await,
        }
    }

    async fn bounded<T, F>(&self, service: ServiceKind, call: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::timeout(service, self.timeout)),
        }
    }

    async fn fail<T>(
        &self,
        operation: Operation,
        token: RequestToken,
        error: ServiceError,
    ) -> Result<Completion<T>, WorkflowError> {
        let applied = self
            .store
            .apply(|session| session.failed(token, operation, error.clone()))
            .await;
        if !applied {
            return Ok(self.superseded(operation, token));
        }
        tracing::warn!("[WorkflowController] {} failed: {}", operation, error);
        Err(WorkflowError::Service(error))
    }

    fn superseded<T>(&self, operation: Operation, token: RequestToken) -> Completion<T> {
        tracing::debug!(
            generation = token.generation,
            sequence = token.sequence,
            "[WorkflowController] Dropping stale {} response",
            operation
        );
        Completion::Superseded
    }
}
