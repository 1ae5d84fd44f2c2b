use std::marker::PhantomData;

use crate::constructor::{Constructor, Settle};
use crate::util::Arity;

/// Callback appended to the arguments of a promisified function.
///
/// Accepts any number of results: exactly one fulfils with [`Arity::One`],
/// zero or several fulfil with [`Arity::Many`] in the order given.
pub struct ResultsCallback<V, E, S> {
    settler: S,
    phantom: PhantomData<fn(V, E)>,
}

impl<V, E, S: Settle<Arity<V>, E>> ResultsCallback<V, E, S> {
    fn new(settler: S) -> Self {
        Self {
            settler,
            phantom: PhantomData,
        }
    }

    pub fn complete(self, outcome: Result<Vec<V>, E>) {
        self.settler.settle(outcome.map(Arity::from_results));
    }

    pub fn node(self, err: Option<E>, results: Vec<V>) {
        match err {
            Some(e) => self.complete(Err(e)),
            None => self.complete(Ok(results)),
        }
    }

    #[inline]
    pub fn resolve(self, result: V) {
        self.settler.resolve(Arity::One(result));
    }

    #[inline]
    pub fn reject(self, err: E) {
        self.settler.reject(err);
    }
}

/// Turns a callback-style function into one returning a promise.
///
/// Calling the wrapper moves its argument (use a tuple for several) to `f`
/// unchanged, followed by a [`ResultsCallback`]. An `Err` returned by `f`
/// itself rejects the promise.
pub fn promisify<C, A, V, E, F>(ctor: &C, f: F) -> impl Fn(A) -> C::Promise<Arity<V>, E>
where
    C: Constructor,
    V: Send + 'static,
    E: Send + 'static,
    F: Fn(A, ResultsCallback<V, E, C::Settler<Arity<V>, E>>) -> Result<(), E>,
{
    let ctor = ctor.clone();
    move |args: A| ctor.construct(|settler| f(args, ResultsCallback::new(settler)))
}
