use std::future::Future;
use std::marker::PhantomData;
use tokio::runtime::Handle;

use crate::constructor::{Constructor, Settle};
use crate::util::{Error, IntoCallbackError};

/// Completion callback handed to the function given to [`from_callback`].
///
/// Consumed on use, so the outcome is delivered at most once.
pub struct Callback<T, E, S> {
    settler: S,
    phantom: PhantomData<fn(T, E)>,
}

impl<T, E, S: Settle<T, E>> Callback<T, E, S> {
    fn new(settler: S) -> Self {
        Self {
            settler,
            phantom: PhantomData,
        }
    }

    pub fn complete(self, outcome: Result<T, E>) {
        self.settler.settle(outcome);
    }

    /// Node-style completion: a present error rejects, otherwise `result`
    /// fulfils.
    pub fn node(self, err: Option<E>, result: T) {
        match err {
            Some(e) => self.complete(Err(e)),
            None => self.complete(Ok(result)),
        }
    }

    #[inline]
    pub fn ok(self, result: T) {
        self.complete(Ok(result))
    }

    #[inline]
    pub fn err(self, err: E) {
        self.complete(Err(err))
    }
}

/// Invokes `f` with a completion callback and returns a promise of its
/// outcome. A panic in `f` propagates to the caller.
pub fn from_callback<C, T, E, F>(ctor: &C, f: F) -> C::Promise<T, E>
where
    C: Constructor,
    T: Send + 'static,
    E: Send + 'static,
    F: FnOnce(Callback<T, E, C::Settler<T, E>>),
{
    ctor.construct(|settler| {
        f(Callback::new(settler));
        Ok(())
    })
}

/// Delivers the outcome of `future` to `cb` exactly once.
///
/// A fulfilled value arrives as `Ok`. A rejection reason is normalized with
/// [`IntoCallbackError`], so non-error reasons arrive wrapped in
/// [`Error::NonError`]. Outside a tokio runtime the future is dropped
/// unpolled and `cb` receives [`Error::NoRuntime`] right away.
pub fn callback<F, T, R, CB>(future: F, cb: CB)
where
    F: Future<Output = Result<T, R>> + Send + 'static,
    T: Send + 'static,
    R: IntoCallbackError + Send + 'static,
    CB: FnOnce(Result<T, Error>) + Send + 'static,
{
    let handle = match Handle::try_current() {
        Ok(handle) => handle,
        Err(_) => {
            log::debug!("callback called outside a tokio runtime");
            cb(Err(Error::NoRuntime("callback")));
            return;
        }
    };
    handle.spawn(async move {
        let outcome = future.await;
        cb(outcome.map_err(IntoCallbackError::into_callback_error));
    });
}
