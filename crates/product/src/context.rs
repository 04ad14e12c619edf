use shared::errors::RepositoryError;
use std::{future::Future, time::Duration};
use tokio::time::{Instant, timeout_at};
use tokio_util::sync::CancellationToken;

/// Per-call cancellation signal and optional deadline.
///
/// Every repository operation runs inside [`RequestContext::run`]; the
/// connection it acquired is dropped (and so returned to the pool) whichever
/// way the call ends.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().timeout(timeout)
    }

    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            cancel: token,
            deadline: None,
        }
    }

    pub fn timeout(self, timeout: Duration) -> Self {
        self.deadline(Instant::now() + timeout)
    }

    /// Keeps the earlier of the current and the new deadline.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    pub async fn run<T, F>(&self, work: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        if self.is_cancelled() {
            return Err(RepositoryError::Cancelled);
        }

        let bounded = async {
            match self.deadline {
                Some(deadline) => timeout_at(deadline, work).await.unwrap_or_else(|_| {
                    Err(RepositoryError::Store("deadline exceeded".to_string()))
                }),
                None => work.await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(RepositoryError::Cancelled),
            result = bounded => result,
        }
    }
}
