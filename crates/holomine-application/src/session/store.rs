use holomine_core::session::Session;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{RwLock, watch};

/// Holds the single active [`Session`].
///
/// Readers get cheap `Arc` snapshots and may subscribe to changes. Writes go
/// through the workflow controller only; each one runs under the write lock,
/// so transitions are serialized and always published whole.
pub struct SessionStore {
    current: RwLock<Arc<Session>>,
    notifier: watch::Sender<Arc<Session>>,
    sequence: AtomicU64,
}

impl SessionStore {
    /// Creates a store holding a fresh `Idle` session.
    pub fn new() -> Self {
        let session = Arc::new(Session::new());
        let (notifier, _) = watch::channel(session.clone());
        Self {
            current: RwLock::new(session),
            notifier,
            sequence: AtomicU64::new(0),
        }
    }

    /// Returns the current session.
    pub async fn snapshot(&self) -> Arc<Session> {
        self.current.read().await.clone()
    }

    /// Returns a receiver that observes every published session.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Session>> {
        self.notifier.subscribe()
    }

    /// Next request sequence number; unique for the lifetime of the store.
    pub(crate) fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Runs a fallible transition and publishes its result.
    ///
    /// On error nothing is written and the error is handed back unchanged.
    pub(crate) async fn transition<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Session) -> Result<(Session, T), E>,
    {
        let mut current = self.current.write().await;
        let (next, output) = f(&current)?;
        self.publish(&mut current, next);
        Ok(output)
    }

    /// Runs a transition that may decline (stale response).
    ///
    /// Returns whether a new session was published.
    pub(crate) async fn apply<F>(&self, f: F) -> bool
    where
        F: FnOnce(&Session) -> Option<Session>,
    {
        let mut current = self.current.write().await;
        match f(&current) {
            Some(next) => {
                self.publish(&mut current, next);
                true
            }
            None => false,
        }
    }

    /// Replaces the session unconditionally and returns the new snapshot.
    pub(crate) async fn replace<F>(&self, f: F) -> Arc<Session>
    where
        F: FnOnce(&Session) -> Session,
    {
        let mut current = self.current.write().await;
        let next = f(&current);
        self.publish(&mut current, next);
        current.clone()
    }

    fn publish(&self, current: &mut Arc<Session>, next: Session) {
        debug_assert!(
            next.check_invariants().is_ok(),
            "session invariant violated: {:?}",
            next.check_invariants()
        );
        let next = Arc::new(next);
        *current = next.clone();
        self.notifier.send_replace(next);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holomine_core::session::{DatasetInput, Stage};

    #[tokio::test]
    async fn test_new_store_starts_idle() {
        let store = SessionStore::new();
        assert_eq!(store.snapshot().await.stage(), Stage::Idle);
    }

    #[tokio::test]
    async fn test_replace_publishes_to_subscribers() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        let snapshot = store
            .replace(|s| s.with_input(DatasetInput::new("a.csv", b"x".to_vec())))
            .await;

        assert_eq!(snapshot.stage(), Stage::Uploaded);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().stage(), Stage::Uploaded);
    }

    #[tokio::test]
    async fn test_failed_transition_leaves_session_untouched() {
        let store = SessionStore::new();
        let before = store.snapshot().await;
        let sequence = store.next_sequence();

        let result = store.transition(|s| s.begin_encrypt(sequence)).await;

        assert!(result.is_err());
        assert!(Arc::ptr_eq(&before, &store.snapshot().await));
    }

    #[tokio::test]
    async fn test_declined_apply_publishes_nothing() {
        let store = SessionStore::new();
        let rx = store.subscribe();

        assert!(!store.apply(|_| None).await);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_sequence_is_monotonic() {
        let store = SessionStore::new();
        let first = store.next_sequence();
        let second = store.next_sequence();
        assert!(second > first);
    }
}
