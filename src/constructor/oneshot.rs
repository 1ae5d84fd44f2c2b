use futures::channel::oneshot;
use futures::future::FutureExt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use crate::constructor::{Constructor, Settle};

/// Constructor backed by a `futures` oneshot channel.
#[derive(Clone, Copy, Debug, Default)]
pub struct Oneshot;

pub struct OneshotPromise<T, E> {
    rx: oneshot::Receiver<Result<T, E>>,
    abandoned: bool,
}

pub struct OneshotSettler<T, E> {
    tx: Arc<Mutex<Option<oneshot::Sender<Result<T, E>>>>>,
}

impl Constructor for Oneshot {
    type Promise<T, E> = OneshotPromise<T, E>
    where
        T: Send + 'static,
        E: Send + 'static;

    type Settler<T, E> = OneshotSettler<T, E>
    where
        T: Send + 'static,
        E: Send + 'static;

    fn construct<T, E, S>(&self, setup: S) -> OneshotPromise<T, E>
    where
        T: Send + 'static,
        E: Send + 'static,
        S: FnOnce(OneshotSettler<T, E>) -> Result<(), E>,
    {
        let (tx, rx) = oneshot::channel();
        let settler = OneshotSettler {
            tx: Arc::new(Mutex::new(Some(tx))),
        };
        if let Err(e) = setup(settler.clone()) {
            if !settler.reject(e) {
                log::trace!("setup failed after settling, error dropped");
            }
        }
        OneshotPromise {
            rx,
            abandoned: false,
        }
    }
}

impl<T, E> OneshotSettler<T, E> {
    fn send(&self, outcome: Result<T, E>) -> bool {
        let tx = self
            .tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match tx {
            // The receiver may be gone already; the promise still counts as settled.
            Some(tx) => {
                let _ = tx.send(outcome);
                true
            }
            None => false,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl<T, E> Clone for OneshotSettler<T, E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T, E> Settle<T, E> for OneshotSettler<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    #[inline]
    fn resolve(&self, value: T) -> bool {
        self.send(Ok(value))
    }

    #[inline]
    fn reject(&self, error: E) -> bool {
        self.send(Err(error))
    }
}

impl<T, E> Future for OneshotPromise<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        if this.abandoned {
            return Poll::Pending;
        }
        match this.rx.poll_unpin(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            // Every settler was dropped unused. Like an unsettled promise, it
            // stays pending forever.
            Poll::Ready(Err(oneshot::Canceled)) => {
                log::debug!("oneshot promise abandoned by all settlers");
                this.abandoned = true;
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
