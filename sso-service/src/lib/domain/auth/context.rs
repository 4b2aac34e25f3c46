use std::future::Future;
use std::time::Duration;

use tokio::time::timeout_at;
use tokio::time::Instant;

use crate::domain::auth::errors::AuthError;

/// Per-call execution context threaded through every collaborator call.
///
/// Carries the caller's absolute deadline. Cancellation proper is dropping the
/// operation future; the deadline turns a caller timeout into `AuthError::Cancelled`
/// instead of letting it surface as some unrelated failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
}

impl CallContext {
    /// Context with no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fail with `Cancelled` if the deadline has already passed.
    ///
    /// Used ahead of a side effect that must not be abandoned once issued.
    pub fn check(&self) -> Result<(), AuthError> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(AuthError::Cancelled),
            _ => Ok(()),
        }
    }

    /// Run `fut` under this context's deadline.
    ///
    /// # Errors
    /// * `Cancelled` - Deadline already passed, or expired while `fut` was pending
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, AuthError>
    where
        F: Future,
    {
        match self.deadline {
            None => Ok(fut.await),
            Some(deadline) => {
                self.check()?;
                timeout_at(deadline, fut)
                    .await
                    .map_err(|_| AuthError::Cancelled)
            }
        }
    }
}
