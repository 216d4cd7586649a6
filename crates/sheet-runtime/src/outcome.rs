#![forbid(unsafe_code)]

//! Deferred results of `present` and `dismiss`.
//!
//! Both operations complete only after the platform reports that its
//! animation finished. The caller gets an [`Outcome`], a future that
//! resolves once; it can be awaited on any executor or polled without one
//! through [`Outcome::try_take`].
//!
//! # Failure Modes
//!
//! - The controller is dropped while the operation is pending: the outcome
//!   resolves to [`SheetError::Cancelled`].
//! - The outcome is dropped: the controller still completes the operation;
//!   the result is discarded.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use sheet_core::SheetError;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

type Slot = Result<(), SheetError>;

/// Pending result of a `present` or `dismiss` call.
#[derive(Debug)]
#[must_use = "an outcome reports whether the operation succeeded"]
pub struct Outcome {
    rx: oneshot::Receiver<Slot>,
}

impl Outcome {
    /// An outcome that is already resolved.
    pub fn ready(result: Slot) -> Self {
        let (tx, rx) = oneshot::channel();
        // The receiver is alive, so the send cannot fail.
        let _ = tx.send(result);
        Self { rx }
    }

    /// Take the result if it is available, without blocking.
    ///
    /// Returns `None` while the operation is still in flight. Once a result
    /// has been taken, later calls report [`SheetError::Cancelled`].
    pub fn try_take(&mut self) -> Option<Slot> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(SheetError::Cancelled)),
        }
    }
}

impl Future for Outcome {
    type Output = Slot;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(SheetError::Cancelled)))
    }
}

/// Waiters for one in-flight operation.
///
/// Every caller that joins while the operation is pending receives the same
/// result when it resolves.
#[derive(Debug, Default)]
pub(crate) struct Completer {
    waiters: Vec<oneshot::Sender<Slot>>,
}

impl Completer {
    /// Add a waiter and return its outcome.
    pub(crate) fn join(&mut self) -> Outcome {
        let (tx, rx) = oneshot::channel();
        self.waiters.push(tx);
        Outcome { rx }
    }

    /// Resolve every waiter with `result`.
    pub(crate) fn resolve(&mut self, result: Slot) {
        for waiter in self.waiters.drain(..) {
            // A dropped outcome just means nobody is listening.
            let _ = waiter.send(result.clone());
        }
    }

    /// Whether any waiter is pending.
    pub(crate) fn is_pending(&self) -> bool {
        !self.waiters.is_empty()
    }
}
