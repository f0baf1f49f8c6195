//! Handshake completion signal.
//!
//! Single-assignment result associated 1:1 with a connection: pending until
//! the handshake completes, times out, or the first fatal error lands.
//! Resolution is atomic and idempotent. Other tasks may wait on the outcome
//! with a caller-supplied timeout instead of touching the state directly.

use crate::error::ConnectionError;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;

#[derive(Clone, Debug)]
enum State {
    Pending,
    Succeeded,
    Failed(ConnectionError),
}

/// Cloneable handle to one connection's handshake outcome.
#[derive(Clone)]
pub struct HandshakeSignal {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<State>,
    notify: Notify,
}

impl HandshakeSignal {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State::Pending),
                notify: Notify::new(),
            }),
        }
    }

    /// Resolve to success. Returns `false` (and changes nothing) if the
    /// signal was already resolved.
    pub fn succeed(&self) -> bool {
        self.resolve(State::Succeeded)
    }

    /// Resolve to failure with the given cause. Returns `false` (and keeps
    /// the first outcome) if the signal was already resolved.
    pub fn fail(&self, cause: ConnectionError) -> bool {
        self.resolve(State::Failed(cause))
    }

    fn resolve(&self, next: State) -> bool {
        let resolved = {
            let mut state = self
                .inner
                .state
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            match *state {
                State::Pending => {
                    *state = next;
                    true
                }
                _ => false,
            }
        };
        if resolved {
            self.inner.notify.notify_waiters();
        }
        resolved
    }

    pub fn is_resolved(&self) -> bool {
        self.try_result().is_some()
    }

    /// Non-blocking observation: `None` while pending.
    pub fn try_result(&self) -> Option<Result<(), ConnectionError>> {
        let state = self
            .inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match &*state {
            State::Pending => None,
            State::Succeeded => Some(Ok(())),
            State::Failed(cause) => Some(Err(cause.clone())),
        }
    }

    /// Wait until the signal resolves, then return the outcome.
    pub async fn wait_ready(&self) -> Result<(), ConnectionError> {
        loop {
            // Register for the wake-up before checking state, so a
            // resolution between the check and the await is not lost.
            let notified = self.inner.notify.notified();
            match self.try_result() {
                Some(outcome) => return outcome,
                None => notified.await,
            }
        }
    }

    /// Wait for resolution with a caller-side deadline.
    pub async fn wait_ready_timeout(&self, limit: Duration) -> Result<(), ConnectionError> {
        match tokio::time::timeout(limit, self.wait_ready()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ConnectionError::Timeout),
        }
    }
}

impl Default for HandshakeSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn starts_pending() {
        let signal = HandshakeSignal::new();
        assert!(!signal.is_resolved());
        assert!(signal.try_result().is_none());
    }

    #[test]
    fn first_resolution_wins() {
        let signal = HandshakeSignal::new();
        assert!(signal.succeed());
        assert!(!signal.fail(ConnectionError::Disconnected));
        assert_eq!(signal.try_result(), Some(Ok(())));
    }

    #[test]
    fn failure_keeps_first_cause() {
        let signal = HandshakeSignal::new();
        assert!(signal.fail(ConnectionError::Disconnected));
        assert!(!signal.fail(ConnectionError::Timeout));
        assert!(!signal.succeed());
        assert_eq!(
            signal.try_result(),
            Some(Err(ConnectionError::Disconnected))
        );
    }

    #[tokio::test]
    async fn waiter_sees_success() {
        let signal = HandshakeSignal::new();
        let waiter = signal.clone();
        let task = tokio::spawn(async move { waiter.wait_ready().await });
        tokio::task::yield_now().await;
        signal.succeed();
        assert_eq!(task.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn waiter_sees_failure_cause() {
        let signal = HandshakeSignal::new();
        let waiter = signal.clone();
        let task = tokio::spawn(async move { waiter.wait_ready().await });
        tokio::task::yield_now().await;
        signal.fail(ConnectionError::HandshakeTimeout {
            address: "ws://db:8182/gremlin".into(),
        });
        assert_eq!(
            task.await.unwrap(),
            Err(ConnectionError::HandshakeTimeout {
                address: "ws://db:8182/gremlin".into()
            })
        );
    }

    #[tokio::test]
    async fn wait_after_resolution_returns_immediately() {
        let signal = HandshakeSignal::new();
        signal.succeed();
        assert_eq!(signal.wait_ready().await, Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_timeout_on_pending_signal() {
        let signal = HandshakeSignal::new();
        let outcome = signal.wait_ready_timeout(Duration::from_secs(1)).await;
        assert_eq!(outcome, Err(ConnectionError::Timeout));
        // still resolvable afterwards
        assert!(signal.succeed());
    }

    #[tokio::test]
    async fn many_waiters_all_unblock() {
        let signal = HandshakeSignal::new();
        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let waiter = signal.clone();
                tokio::spawn(async move { waiter.wait_ready().await })
            })
            .collect();
        tokio::task::yield_now().await;
        signal.succeed();
        for task in tasks {
            assert_eq!(task.await.unwrap(), Ok(()));
        }
    }
}
