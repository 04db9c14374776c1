//! Resolution handles for asynchronous texture fetches.
//!
//! A [`Resolution`] is either already complete or pending on a fetch
//! task. Pending handles are cheap to clone, so every concurrent caller
//! for the same key can observe the same in-flight result. Waiting with
//! a timeout merely detaches the waiter; the underlying task always
//! runs to completion and commits its result.

use std::time::Duration;

use tokio::sync::watch;

/// Completion side of a pending resolution, held by the fetch task.
pub(crate) struct ResolutionSender<T> {
    tx: watch::Sender<Option<T>>,
}

impl<T> ResolutionSender<T> {
    /// Publish the final value to every waiting handle.
    pub(crate) fn complete(self, value: T) {
        let _ = self.tx.send(Some(value));
    }
}

/// A texture resolution that may still be in flight.
#[derive(Clone)]
pub struct Resolution<T> {
    inner: Inner<T>,
}

#[derive(Clone)]
enum Inner<T> {
    Ready(T),
    Pending(watch::Receiver<Option<T>>),
}

impl<T: Clone> Resolution<T> {
    /// An already-complete resolution.
    pub fn ready(value: T) -> Self {
        Self {
            inner: Inner::Ready(value),
        }
    }

    /// Create a pending resolution and the sender its fetch task
    /// completes it with.
    pub(crate) fn pending() -> (ResolutionSender<T>, Self) {
        let (tx, rx) = watch::channel(None);
        (
            ResolutionSender { tx },
            Self {
                inner: Inner::Pending(rx),
            },
        )
    }

    /// Wait for the value without a bound. Resolves to `None` only if
    /// the fetch task vanished without completing.
    pub async fn wait(self) -> Option<T> {
        match self.inner {
            Inner::Ready(value) => Some(value),
            Inner::Pending(mut rx) => match rx.wait_for(|v| v.is_some()).await {
                Ok(guard) => guard.clone(),
                Err(_) => None,
            },
        }
    }

    /// Wait up to `timeout`, falling back to `default` on timeout or a
    /// vanished fetch task. The underlying fetch is never cancelled.
    pub async fn wait_or(self, default: T, timeout: Duration) -> T {
        match self.inner {
            Inner::Ready(value) => value,
            Inner::Pending(mut rx) => {
                match tokio::time::timeout(timeout, rx.wait_for(|v| v.is_some())).await {
                    Ok(Ok(guard)) => guard.clone().unwrap_or(default),
                    _ => default,
                }
            }
        }
    }
}
