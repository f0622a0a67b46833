use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::{DbError, Result};

/// Per-call context threaded from the HTTP edge down to the store.
///
/// Carries a cancellation token and an optional deadline. Store primitives race
/// the query against both; whichever fires first drops the in-flight query.
#[derive(Clone, Debug)]
pub struct RequestCtx {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestCtx {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::new(CancellationToken::new())
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// Deadline relative to now. A zero duration means "no deadline".
    pub fn with_timeout(self, timeout: Duration) -> Self {
        if timeout.is_zero() {
            self
        } else {
            self.with_deadline(Instant::now() + timeout)
        }
    }

    /// A context cancelled together with this one, but cancellable on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Guard that cancels this context when dropped.
    pub fn cancel_on_drop(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Drive `fut` to completion unless the context is cancelled or the deadline passes.
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, sqlx::Error>>,
    {
        let bounded = async {
            match self.deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, fut).await {
                    Ok(res) => res.map_err(DbError::from),
                    Err(_) => Err(DbError::DeadlineExceeded),
                },
                None => fut.await.map_err(DbError::from),
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(DbError::Canceled),
            res = bounded => res,
        }
    }
}

impl Default for RequestCtx {
    fn default() -> Self {
        Self::background()
    }
}
