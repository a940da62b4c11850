//! Request-scoped deadline and cancellation
//!
//! Every trait method receives a Context. Providers wrap their external
//! calls in [`Context::run`] so an expired deadline or a cancelled request
//! stops waiting on the remote API.

use crate::error::{Result, TfplugError};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    deadline: Option<Instant>,
    done: watch::Receiver<bool>,
    done_tx: watch::Sender<bool>,
}

impl Context {
    pub fn new() -> Self {
        let (done_tx, done) = watch::channel(false);

        Self {
            inner: Arc::new(ContextInner {
                deadline: None,
                done,
                done_tx,
            }),
        }
    }

    /// Derive a context that expires after `timeout`. An earlier deadline on
    /// the parent wins.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let candidate = Instant::now() + timeout;
        let deadline = match self.inner.deadline {
            Some(parent) if parent < candidate => parent,
            _ => candidate,
        };

        let (done_tx, done) = watch::channel(self.is_cancelled());

        Self {
            inner: Arc::new(ContextInner {
                deadline: Some(deadline),
                done,
                done_tx,
            }),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.done.borrow()
    }

    pub fn cancel(&self) {
        let _ = self.inner.done_tx.send(true);
    }

    /// Drive `fut` to completion unless the context is cancelled or its
    /// deadline passes first
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output> {
        if self.is_cancelled() {
            return Err(TfplugError::Cancelled);
        }

        let mut done = self.inner.done.clone();
        let cancelled = async move {
            loop {
                if done.changed().await.is_err() {
                    // Sender dropped: nobody can cancel any more
                    std::future::pending::<()>().await;
                }
                if *done.borrow() {
                    return;
                }
            }
        };

        match self.inner.deadline {
            Some(deadline) => {
                tokio::select! {
                    out = tokio::time::timeout_at(deadline.into(), fut) => {
                        out.map_err(|_| TfplugError::DeadlineExceeded)
                    }
                    _ = cancelled => Err(TfplugError::Cancelled),
                }
            }
            None => {
                tokio::select! {
                    out = fut => Ok(out),
                    _ = cancelled => Err(TfplugError::Cancelled),
                }
            }
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn run_returns_output_without_deadline() {
        let ctx = Context::new();
        let out = ctx.run(async { 7 }).await.unwrap();
        assert_eq!(out, 7);
    }

    #[tokio::test]
    async fn run_times_out_after_deadline() {
        let ctx = Context::new().with_timeout(Duration::from_millis(20));

        let result = ctx.run(sleep(Duration::from_millis(500))).await;
        assert!(matches!(result, Err(TfplugError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn context_manual_cancel() {
        let ctx = Context::new();
        assert!(!ctx.is_cancelled());

        ctx.cancel();

        assert!(ctx.is_cancelled());
        let result = ctx.run(async { 1 }).await;
        assert!(matches!(result, Err(TfplugError::Cancelled)));
    }

    #[tokio::test]
    async fn cancel_interrupts_running_call() {
        let ctx = Context::new();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let result = ctx.run(sleep(Duration::from_secs(5))).await;
        assert!(matches!(result, Err(TfplugError::Cancelled)));
    }

    #[tokio::test]
    async fn child_keeps_earlier_parent_deadline() {
        let parent = Context::new().with_timeout(Duration::from_millis(50));
        let child = parent.with_timeout(Duration::from_secs(60));

        assert_eq!(child.deadline(), parent.deadline());
    }
}
