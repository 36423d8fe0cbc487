//! One-shot completion signal for a launched process

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::error::{ComposeError, Result};

/// Outcome of a launched process, delivered exactly once
///
/// Await it to receive `Ok(())` for a zero exit status or the error the
/// process finished with. Dropping it does not stop the process.
#[derive(Debug)]
pub struct Completion {
    rx: oneshot::Receiver<Result<()>>,
}

/// Sending half of a [`Completion`]
///
/// Consumed by [`CompletionSender::complete`], so a value can be written at
/// most once.
#[derive(Debug)]
pub struct CompletionSender {
    tx: oneshot::Sender<Result<()>>,
}

impl Completion {
    /// Create a connected sender/completion pair
    #[must_use]
    pub fn channel() -> (CompletionSender, Self) {
        let (tx, rx) = oneshot::channel();
        (CompletionSender { tx }, Self { rx })
    }

    /// Completion that already holds its outcome
    #[must_use]
    pub fn ready(result: Result<()>) -> Self {
        let (tx, completion) = Self::channel();
        tx.complete(result);
        completion
    }

    /// Take the outcome if the process has already finished
    ///
    /// Returns `None` while the process is still running. Once an outcome has
    /// been taken, later calls report a runner error.
    pub fn try_result(&mut self) -> Option<Result<()>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(closed())),
        }
    }
}

impl CompletionSender {
    /// Deliver the outcome
    ///
    /// A dropped [`Completion`] is not an error; the value is discarded.
    pub fn complete(self, result: Result<()>) {
        let _ = self.tx.send(result);
    }
}

impl Future for Completion {
    type Output = Result<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(closed())),
            Poll::Pending => Poll::Pending,
        }
    }
}

fn closed() -> ComposeError {
    ComposeError::runner("process watcher exited without reporting a result")
}
