//! Cancellation and deadlines for pipeline calls.
//!
//! Every call that goes through the request pipeline takes a [`Context`].
//! Each await inside the pipeline (sending, reading the body, the rate-limit
//! pause) runs under the context, so a cancelled or expired context stops the
//! call at the next suspension point.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use contentful::Context;
//!
//! # tokio_test::block_on(async {
//! let (ctx, handle) = Context::cancellable();
//! handle.cancel();
//!
//! let result = ctx.run(tokio::time::sleep(Duration::from_secs(60))).await;
//! assert!(matches!(result, Err(contentful::HttpError::Cancelled)));
//! # });
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::clients::errors::HttpError;

/// Cancellation signal and optional deadline carried by every call.
///
/// Contexts are cheap to clone; clones share the same cancellation signal.
#[derive(Clone, Debug, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

/// Cancels every [`Context`] created from the same [`Context::cancellable`] call.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signals cancellation.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl Context {
    /// Returns a context that is never cancelled and has no deadline.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Returns a context that expires `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Returns a context that expires at `deadline`.
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancel: None,
        }
    }

    /// Returns a cancellable context and the handle that cancels it.
    #[must_use]
    pub fn cancellable() -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        let ctx = Self {
            deadline: None,
            cancel: Some(receiver),
        };
        (ctx, CancelHandle { sender })
    }

    /// Returns a copy of this context whose deadline is at most `timeout`
    /// from now.
    #[must_use]
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        Self {
            deadline: Some(self.deadline.map_or(deadline, |d| d.min(deadline))),
            cancel: self.cancel.clone(),
        }
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` if cancellation has been signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Runs `future` under this context.
    ///
    /// A pending cancellation wins over a passed deadline, which wins over a
    /// ready future.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Cancelled`] or [`HttpError::DeadlineExceeded`]
    /// if the context ends before `future` completes.
    pub async fn run<F>(&self, future: F) -> Result<F::Output, HttpError>
    where
        F: Future,
    {
        let cancelled = async {
            match self.cancel.clone() {
                Some(mut rx) => {
                    if rx.wait_for(|cancelled| *cancelled).await.is_err() {
                        // handle dropped without cancelling
                        std::future::pending::<()>().await;
                    }
                }
                None => std::future::pending::<()>().await,
            }
        };

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = cancelled => Err(HttpError::Cancelled),
            () = expired => Err(HttpError::DeadlineExceeded),
            output = future => Ok(output),
        }
    }
}

// Verify Context is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Context>();
    assert_send_sync::<CancelHandle>();
};
