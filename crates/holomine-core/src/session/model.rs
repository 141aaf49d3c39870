//! Session domain model.
//!
//! A [`Session`] is an immutable value: every transition builds a new
//! session from the current one, and the store swaps it in whole. Readers
//! therefore only ever observe complete transitions.
//!
//! Transitions that react to a backend response take the [`RequestToken`]
//! issued when the request was dispatched and return `None` when that token
//! is no longer current (a later `with_input` or `reset` superseded it).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::input::DatasetInput;
use super::stage::Stage;
use crate::algorithm::MiningAlgorithm;
use crate::contract::{EncryptionResult, MiningRequest, MiningResult};
use crate::error::{Operation, ServiceError, WorkflowError};

/// Identifies one outstanding backend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken {
    /// Session generation the request was issued under.
    pub generation: u64,
    /// Store-wide request sequence number.
    pub sequence: u64,
}

/// A mining result together with what produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct MiningRun {
    /// Algorithm identifier sent to the Mining Service.
    pub algorithm: MiningAlgorithm,
    /// Session token of the encryption artifact that was mined.
    pub encryption_session_id: String,
    pub result: MiningResult,
}

/// The last failed request of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub operation: Operation,
    pub error: ServiceError,
    /// Encryption artifact kept after a failed mining call so mining can be
    /// retried without re-encrypting.
    pub retained_encryption: Option<EncryptionResult>,
    pub occurred_at: DateTime<Utc>,
}

impl Failure {
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    /// HTTP status of the failed call, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        self.error.status()
    }
}

/// The single active record of one user interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: Uuid,
    generation: u64,
    stage: Stage,
    input: Option<DatasetInput>,
    encryption: Option<EncryptionResult>,
    mining: Option<MiningRun>,
    failure: Option<Failure>,
    pending: Option<RequestToken>,
    updated_at: DateTime<Utc>,
}

impl Session {
    /// Creates a fresh `Idle` session.
    pub fn new() -> Self {
        Self::blank(0)
    }

    fn blank(generation: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            generation,
            stage: Stage::Idle,
            input: None,
            encryption: None,
            mining: None,
            failure: None,
            pending: None,
            updated_at: Utc::now(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Identifier of this session record; changes on every wholesale replacement.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn input(&self) -> Option<&DatasetInput> {
        self.input.as_ref()
    }

    /// The published encryption artifact (Encrypted, Mining, MiningComplete).
    pub fn encryption(&self) -> Option<&EncryptionResult> {
        self.encryption.as_ref()
    }

    /// The published mining run (MiningComplete only).
    pub fn mining(&self) -> Option<&MiningRun> {
        self.mining.as_ref()
    }

    pub fn mining_result(&self) -> Option<&MiningResult> {
        self.mining.as_ref().map(|run| &run.result)
    }

    /// The last error, when the session is `Failed`.
    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    pub fn last_error(&self) -> Option<String> {
        self.failure.as_ref().map(Failure::message)
    }

    /// The outstanding request, when the session is in flight.
    pub fn pending(&self) -> Option<RequestToken> {
        self.pending
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether `token` still identifies this session's outstanding request.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.pending == Some(token)
    }

    /// The encryption artifact mining would run on, if any.
    pub fn minable_encryption(&self) -> Option<&EncryptionResult> {
        match self.stage {
            Stage::Encrypted | Stage::MiningComplete => self.encryption.as_ref(),
            Stage::Failed => self
                .failure
                .as_ref()
                .and_then(|f| f.retained_encryption.as_ref()),
            _ => None,
        }
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Returns to `Idle`, dropping every artifact and invalidating in-flight requests.
    pub fn reset(&self) -> Self {
        Self::blank(self.generation + 1)
    }

    /// Replaces the dataset; allowed from any stage.
    pub fn with_input(&self, input: DatasetInput) -> Self {
        Self {
            stage: Stage::Uploaded,
            input: Some(input),
            ..Self::blank(self.generation + 1)
        }
    }

    /// Enters `Encrypting`.
    ///
    /// # Errors
    ///
    /// - `Busy` while another request is outstanding
    /// - `Precondition` unless the stage is `Uploaded` or `Failed` with an input
    pub fn begin_encrypt(&self, sequence: u64) -> Result<(Self, RequestToken), WorkflowError> {
        if self.stage.is_in_flight() {
            return Err(WorkflowError::busy(self.stage));
        }

        let input = match (self.stage, self.input.as_ref()) {
            (Stage::Uploaded | Stage::Failed, Some(input)) => input.clone(),
            (Stage::Idle, _) | (_, None) => {
                return Err(WorkflowError::precondition(
                    Operation::Encrypt,
                    "no input selected",
                ));
            }
            (stage, Some(_)) => {
                return Err(WorkflowError::precondition(
                    Operation::Encrypt,
                    format!("dataset is already encrypted (stage: {stage}); select a new file first"),
                ));
            }
        };

        let token = RequestToken {
            generation: self.generation,
            sequence,
        };
        let next = Self {
            id: self.id,
            generation: self.generation,
            stage: Stage::Encrypting,
            input: Some(input),
            encryption: None,
            mining: None,
            failure: None,
            pending: Some(token),
            updated_at: Utc::now(),
        };
        Ok((next, token))
    }

    /// Applies a successful encryption response; `None` if `token` is stale.
    pub fn encrypted(&self, token: RequestToken, result: EncryptionResult) -> Option<Self> {
        if !self.is_current(token) || self.stage != Stage::Encrypting {
            return None;
        }
        Some(Self {
            stage: Stage::Encrypted,
            encryption: Some(result),
            pending: None,
            updated_at: Utc::now(),
            ..self.clone()
        })
    }

    /// Enters `Mining` and builds the request for the Mining Service.
    ///
    /// # Errors
    ///
    /// - `Busy` while another request is outstanding
    /// - `Precondition` when no successful encryption is available
    pub fn begin_mining(
        &self,
        algorithm: MiningAlgorithm,
        sequence: u64,
    ) -> Result<(Self, RequestToken, MiningRequest), WorkflowError> {
        if self.stage.is_in_flight() {
            return Err(WorkflowError::busy(self.stage));
        }

        let encryption = self
            .minable_encryption()
            .cloned()
            .ok_or_else(|| WorkflowError::precondition(Operation::Mine, "no encrypted data"))?;

        let token = RequestToken {
            generation: self.generation,
            sequence,
        };
        let request = MiningRequest::new(encryption.encrypted.clone(), algorithm);
        let next = Self {
            stage: Stage::Mining,
            encryption: Some(encryption),
            mining: None,
            failure: None,
            pending: Some(token),
            updated_at: Utc::now(),
            ..self.clone()
        };
        Ok((next, token, request))
    }

    /// Applies a successful mining response; `None` if `token` is stale.
    pub fn mined(
        &self,
        token: RequestToken,
        algorithm: MiningAlgorithm,
        result: MiningResult,
    ) -> Option<Self> {
        if !self.is_current(token) || self.stage != Stage::Mining {
            return None;
        }
        let encryption_session_id = self.encryption.as_ref()?.session_id.clone();
        Some(Self {
            stage: Stage::MiningComplete,
            mining: Some(MiningRun {
                algorithm,
                encryption_session_id,
                result,
            }),
            pending: None,
            updated_at: Utc::now(),
            ..self.clone()
        })
    }

    /// Records a failed request; `None` if `token` is stale.
    ///
    /// The input is always kept. A failed mining call additionally keeps the
    /// encryption artifact in the failure record.
    pub fn failed(
        &self,
        token: RequestToken,
        operation: Operation,
        error: ServiceError,
    ) -> Option<Self> {
        if !self.is_current(token) {
            return None;
        }
        let retained_encryption = match operation {
            Operation::Encrypt => None,
            Operation::Mine => self.encryption.clone(),
        };
        Some(Self {
            stage: Stage::Failed,
            encryption: None,
            mining: None,
            failure: Some(Failure {
                operation,
                error,
                retained_encryption,
                occurred_at: Utc::now(),
            }),
            pending: None,
            updated_at: Utc::now(),
            ..self.clone()
        })
    }

    // ========================================================================
    // Invariants
    // ========================================================================

    /// Checks the structural invariants tying artifacts to the stage.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.encryption.is_some() != self.stage.publishes_encryption() {
            return Err(format!(
                "encryption result present={} in stage {}",
                self.encryption.is_some(),
                self.stage
            ));
        }
        if self.mining.is_some() != self.stage.publishes_mining() {
            return Err(format!(
                "mining result present={} in stage {}",
                self.mining.is_some(),
                self.stage
            ));
        }
        if let Some(run) = &self.mining {
            if run.result.patterns.is_empty() {
                return Err("mining result has no patterns".to_string());
            }
        }
        if self.pending.is_some() != self.stage.is_in_flight() {
            return Err(format!(
                "pending request present={} in stage {}",
                self.pending.is_some(),
                self.stage
            ));
        }
        if self.failure.is_some() != (self.stage == Stage::Failed) {
            return Err(format!(
                "failure present={} in stage {}",
                self.failure.is_some(),
                self.stage
            ));
        }
        if self.input.is_some() == (self.stage == Stage::Idle) {
            return Err(format!(
                "input present={} in stage {}",
                self.input.is_some(),
                self.stage
            ));
        }
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceKind;

    fn input() -> DatasetInput {
        DatasetInput::new("sample-data.json", br#"[{"id":1}]"#.to_vec())
    }

    fn encryption(session_id: &str) -> EncryptionResult {
        EncryptionResult {
            algorithm: "Holographic-AES-256-CBC".to_string(),
            key_size: 256,
            record_count: 8,
            session_id: session_id.to_string(),
            encrypted: "QmFzZTY0".to_string(),
            timestamp: None,
        }
    }

    fn mining_result() -> MiningResult {
        MiningResult {
            algorithm: "K-Means Clustering".to_string(),
            execution_time: 42.0,
            privacy_level: "100%".to_string(),
            patterns: vec!["Group 1".into(), "Group 2".into(), "Group 3".into()],
            timestamp: None,
        }
    }

    fn encrypted_session() -> Session {
        let (encrypting, token) = Session::new().with_input(input()).begin_encrypt(1).unwrap();
        encrypting.encrypted(token, encryption("abc123")).unwrap()
    }

    #[test]
    fn test_new_session_is_idle_and_consistent() {
        let session = Session::new();
        assert_eq!(session.stage(), Stage::Idle);
        assert_eq!(session.generation(), 0);
        session.check_invariants().unwrap();
    }

    #[test]
    fn test_with_input_clears_artifacts_and_bumps_generation() {
        let session = encrypted_session();
        let old_generation = session.generation();

        let next = session.with_input(input());
        assert_eq!(next.stage(), Stage::Uploaded);
        assert!(next.encryption().is_none());
        assert!(next.mining().is_none());
        assert_eq!(next.generation(), old_generation + 1);
        assert_ne!(next.id(), session.id());
        next.check_invariants().unwrap();
    }

    #[test]
    fn test_encrypt_requires_input() {
        let err = Session::new().begin_encrypt(1).unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(err.to_string(), "cannot encrypt: no input selected");
    }

    #[test]
    fn test_encrypt_rejected_when_already_encrypted() {
        let err = encrypted_session().begin_encrypt(2).unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn test_encrypt_transitions() {
        let (encrypting, token) = Session::new().with_input(input()).begin_encrypt(7).unwrap();
        assert_eq!(encrypting.stage(), Stage::Encrypting);
        assert_eq!(encrypting.pending(), Some(token));
        assert_eq!(token.sequence, 7);
        encrypting.check_invariants().unwrap();

        let encrypted = encrypting.encrypted(token, encryption("abc123")).unwrap();
        assert_eq!(encrypted.stage(), Stage::Encrypted);
        assert_eq!(encrypted.encryption().unwrap().session_id, "abc123");
        assert!(encrypted.pending().is_none());
        encrypted.check_invariants().unwrap();
    }

    #[test]
    fn test_busy_while_in_flight() {
        let (encrypting, _) = Session::new().with_input(input()).begin_encrypt(1).unwrap();
        assert!(encrypting.begin_encrypt(2).unwrap_err().is_busy());
        assert!(
            encrypting
                .begin_mining(MiningAlgorithm::Clustering, 2)
                .unwrap_err()
                .is_busy()
        );
    }

    #[test]
    fn test_mining_requires_encryption() {
        let uploaded = Session::new().with_input(input());
        let err = uploaded
            .begin_mining(MiningAlgorithm::Clustering, 1)
            .unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(err.to_string(), "cannot mine: no encrypted data");
    }

    #[test]
    fn test_mining_transitions_and_ties_result_to_algorithm() {
        let (mining, token, request) = encrypted_session()
            .begin_mining(MiningAlgorithm::Clustering, 2)
            .unwrap();
        assert_eq!(mining.stage(), Stage::Mining);
        assert_eq!(request.encrypted_data, "QmFzZTY0");
        assert_eq!(request.algorithm, MiningAlgorithm::Clustering);
        mining.check_invariants().unwrap();

        let complete = mining
            .mined(token, MiningAlgorithm::Clustering, mining_result())
            .unwrap();
        assert_eq!(complete.stage(), Stage::MiningComplete);
        let run = complete.mining().unwrap();
        assert_eq!(run.algorithm, MiningAlgorithm::Clustering);
        assert_eq!(run.encryption_session_id, "abc123");
        assert_eq!(run.result.patterns.len(), 3);
        complete.check_invariants().unwrap();
    }

    #[test]
    fn test_rerun_mining_from_complete() {
        let (mining, token, _) = encrypted_session()
            .begin_mining(MiningAlgorithm::Clustering, 2)
            .unwrap();
        let complete = mining
            .mined(token, MiningAlgorithm::Clustering, mining_result())
            .unwrap();

        let (again, _, request) = complete
            .begin_mining(MiningAlgorithm::Outlier, 3)
            .unwrap();
        assert_eq!(again.stage(), Stage::Mining);
        assert!(again.mining().is_none());
        assert_eq!(request.algorithm, MiningAlgorithm::Outlier);
    }

    #[test]
    fn test_failed_mining_retains_encryption_for_retry() {
        let (mining, token, _) = encrypted_session()
            .begin_mining(MiningAlgorithm::Association, 2)
            .unwrap();
        let failed = mining
            .failed(
                token,
                Operation::Mine,
                ServiceError::http(ServiceKind::Mining, 500, "boom"),
            )
            .unwrap();

        assert_eq!(failed.stage(), Stage::Failed);
        assert!(failed.encryption().is_none());
        assert!(failed.minable_encryption().is_some());
        assert!(failed.last_error().unwrap().contains("boom"));
        failed.check_invariants().unwrap();

        let (retry, _, request) = failed
            .begin_mining(MiningAlgorithm::Association, 3)
            .unwrap();
        assert_eq!(retry.stage(), Stage::Mining);
        assert_eq!(request.encrypted_data, "QmFzZTY0");
    }

    #[test]
    fn test_failed_encryption_keeps_input_and_allows_retry() {
        let (encrypting, token) = Session::new().with_input(input()).begin_encrypt(1).unwrap();
        let failed = encrypting
            .failed(
                token,
                Operation::Encrypt,
                ServiceError::http(ServiceKind::Encryption, 500, "down"),
            )
            .unwrap();

        assert_eq!(failed.stage(), Stage::Failed);
        assert_eq!(failed.input().unwrap().file_name(), "sample-data.json");
        assert!(failed.minable_encryption().is_none());
        assert!(
            failed
                .begin_mining(MiningAlgorithm::Clustering, 2)
                .unwrap_err()
                .is_precondition()
        );
        assert!(failed.begin_encrypt(2).is_ok());
    }

    #[test]
    fn test_stale_token_is_rejected_after_new_input() {
        let (encrypting, token) = Session::new().with_input(input()).begin_encrypt(1).unwrap();
        let replaced = encrypting.with_input(input());

        assert!(replaced.encrypted(token, encryption("late")).is_none());
        assert!(
            replaced
                .failed(
                    token,
                    Operation::Encrypt,
                    ServiceError::transport(ServiceKind::Encryption, "reset")
                )
                .is_none()
        );
    }

    #[test]
    fn test_stale_token_is_rejected_after_reset() {
        let (mining, token, _) = encrypted_session()
            .begin_mining(MiningAlgorithm::Clustering, 2)
            .unwrap();
        let idle = mining.reset();

        assert_eq!(idle.stage(), Stage::Idle);
        assert!(
            idle.mined(token, MiningAlgorithm::Clustering, mining_result())
                .is_none()
        );
        idle.check_invariants().unwrap();
    }
}
