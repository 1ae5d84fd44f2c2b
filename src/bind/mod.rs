use std::future::Future;

use crate::callback::{self, Callback};
use crate::constructor::Constructor;
use crate::deferred::{self, DeferredOf};
use crate::event::{self, Emitter};
use crate::promisify::{self, ResultsCallback};
use crate::race::{self, IntoTimeout};
use crate::util::{Arity, IntoCallbackError, Result, TimedOut};

/// The operations making up the public surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Timeout,
    FromCallback,
    Callback,
    EventToPromise,
    Deferred,
    Promisify,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Timeout,
        Operation::FromCallback,
        Operation::Callback,
        Operation::EventToPromise,
        Operation::Deferred,
        Operation::Promisify,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Timeout => "timeout",
            Operation::FromCallback => "fromCallback",
            Operation::Callback => "callback",
            Operation::EventToPromise => "eventToPromise",
            Operation::Deferred => "deferred",
            Operation::Promisify => "promisify",
        }
    }

    /// Whether the operation builds a promise and so takes a constructor.
    /// `callback` only consumes one.
    pub fn binds_constructor(self) -> bool {
        match self {
            Operation::Callback => false,
            _ => true,
        }
    }
}

/// The whole surface with one constructor pre-bound.
#[derive(Clone, Debug)]
pub struct Bound<C> {
    ctor: C,
}

/// Binds `ctor` as the constructor of every operation that needs one.
pub fn with_constructor<C: Constructor>(ctor: C) -> Bound<C> {
    Bound { ctor }
}

impl<C: Constructor> Bound<C> {
    pub fn constructor(&self) -> &C {
        &self.ctor
    }

    pub fn operations(&self) -> &'static [Operation] {
        &Operation::ALL
    }

    pub fn timeout<D, F, T, E>(
        &self,
        duration: D,
        future: F,
        message: Option<&str>,
    ) -> Result<C::Promise<T, E>>
    where
        D: IntoTimeout,
        F: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: From<TimedOut> + Send + 'static,
    {
        race::timeout(&self.ctor, duration, future, message)
    }

    pub fn from_callback<T, E, F>(&self, f: F) -> C::Promise<T, E>
    where
        T: Send + 'static,
        E: Send + 'static,
        F: FnOnce(Callback<T, E, C::Settler<T, E>>),
    {
        callback::from_callback(&self.ctor, f)
    }

    pub fn promisify<A, V, E, F>(&self, f: F) -> impl Fn(A) -> C::Promise<Arity<V>, E>
    where
        V: Send + 'static,
        E: Send + 'static,
        F: Fn(A, ResultsCallback<V, E, C::Settler<Arity<V>, E>>) -> std::result::Result<(), E>,
    {
        promisify::promisify(&self.ctor, f)
    }

    pub fn callback<F, T, R, CB>(&self, future: F, cb: CB)
    where
        F: Future<Output = std::result::Result<T, R>> + Send + 'static,
        T: Send + 'static,
        R: IntoCallbackError + Send + 'static,
        CB: FnOnce(std::result::Result<T, crate::util::Error>) + Send + 'static,
    {
        callback::callback(future, cb)
    }

    pub fn event_to_promise<M, P, E>(&self, emitter: &M, event: &str) -> C::Promise<P, E>
    where
        M: Emitter<P> + ?Sized,
        P: Send + 'static,
        E: Send + 'static,
    {
        event::event_to_promise(&self.ctor, emitter, event)
    }

    pub fn deferred<T, E>(&self) -> DeferredOf<C, T, E>
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        deferred::deferred(&self.ctor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructor::{Oneshot, Settle};
    use crate::event::EventEmitter;
    use crate::util::test::{run_in_tokio, Counting};
    use crate::util::Error;
    use tokio::sync::oneshot;

    #[test]
    fn test_operation_table() {
        let names: Vec<_> = Operation::ALL.iter().map(|op| op.name()).collect();
        assert_eq!(
            names,
            vec!["timeout", "fromCallback", "callback", "eventToPromise", "deferred", "promisify"]
        );
        let unbound: Vec<_> = Operation::ALL
            .iter()
            .filter(|op| !op.binds_constructor())
            .collect();
        assert_eq!(unbound, vec![&Operation::Callback]);
        assert_eq!(with_constructor(Oneshot).operations().len(), 6);
    }

    #[test]
    fn test_bound_surface_uses_constructor() {
        run_in_tokio(async move {
            let ctor = Counting::default();
            let bound = with_constructor(ctor.clone());

            let p = bound.from_callback(|cb| cb.ok(1));
            assert_eq!(p.await, Ok::<_, ()>(1));

            let promisified = bound.promisify(|n: i32, cb: ResultsCallback<i32, (), _>| {
                cb.complete(Ok(vec![n, n + 1]));
                Ok(())
            });
            assert_eq!(promisified(1).await, Ok(Arity::Many(vec![1, 2])));
            assert_eq!(promisified(2).await, Ok(Arity::Many(vec![2, 3])));

            let d = bound.deferred::<&'static str, Error>();
            let controls = d.controls();
            let p = bound.timeout(50u64, d.promise, None).unwrap();
            controls.resolve("later");
            assert_eq!(p.await.unwrap(), "later");

            let emitter = EventEmitter::new();
            let p = bound.event_to_promise::<_, _, ()>(&emitter, "go");
            emitter.emit("go", 9);
            assert_eq!(p.await, Ok(9));

            // from_callback, two promisified calls, deferred, timeout, event.
            assert_eq!(bound.constructor().constructed(), 6);
            assert_eq!(ctor.constructed(), 6);

            let (tx, rx) = oneshot::channel();
            bound.callback(async { Err::<(), _>(7u64) }, move |r| {
                let _ = tx.send(r);
            });
            let e = rx.await.unwrap().unwrap_err();
            assert_eq!(e.original().unwrap().downcast_ref::<u64>(), Some(&7));
            assert_eq!(ctor.constructed(), 6);
        });
    }

    #[test]
    fn test_independent_surfaces() {
        let first = Counting::default();
        let second = Counting::default();
        let a = with_constructor(first.clone());
        let b = with_constructor(second.clone());
        let _ = a.deferred::<(), ()>();
        let _ = a.deferred::<(), ()>();
        let _ = b.deferred::<(), ()>();
        assert_eq!(first.constructed(), 2);
        assert_eq!(second.constructed(), 1);
    }
}
