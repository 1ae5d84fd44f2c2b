use std::future::Future;

mod oneshot;
pub use oneshot::{Oneshot, OneshotPromise, OneshotSettler};

/// Settle controls handed to a constructor's setup procedure.
///
/// Only the first call to either method settles the promise. Later calls are
/// no-ops and return `false`.
pub trait Settle<T, E>: Clone + Send + 'static {
    fn resolve(&self, value: T) -> bool;
    fn reject(&self, error: E) -> bool;

    fn settle(&self, outcome: Result<T, E>) -> bool {
        match outcome {
            Ok(value) => self.resolve(value),
            Err(error) => self.reject(error),
        }
    }
}

/// A capability that builds new promises.
///
/// Every operation in this crate that produces a promise takes one of these
/// explicitly, so the same logic runs atop any conforming implementation.
pub trait Constructor: Clone + Send + Sync + 'static {
    type Promise<T, E>: Future<Output = Result<T, E>> + Send + 'static
    where
        T: Send + 'static,
        E: Send + 'static;

    type Settler<T, E>: Settle<T, E>
    where
        T: Send + 'static,
        E: Send + 'static;

    /// Builds a promise and runs `setup` with its settle controls before
    /// returning. An `Err` returned by `setup` rejects the promise unless
    /// `setup` already settled it.
    fn construct<T, E, S>(&self, setup: S) -> Self::Promise<T, E>
    where
        T: Send + 'static,
        E: Send + 'static,
        S: FnOnce(Self::Settler<T, E>) -> Result<(), E>;
}
