use std::marker::PhantomData;

use crate::constructor::{Constructor, Settle};

/// A promise together with the controls that settle it.
///
/// The controls are the constructor's own, so the first of
/// [`Deferred::resolve`] and [`Deferred::reject`] wins by its contract.
pub struct Deferred<P, S, T, E> {
    pub promise: P,
    controls: S,
    phantom: PhantomData<fn(T, E)>,
}

impl<P, S, T, E> Deferred<P, S, T, E>
where
    S: Settle<T, E>,
{
    #[inline]
    pub fn resolve(&self, value: T) -> bool {
        self.controls.resolve(value)
    }

    #[inline]
    pub fn reject(&self, error: E) -> bool {
        self.controls.reject(error)
    }

    /// A copy of the controls, to settle from elsewhere.
    pub fn controls(&self) -> S {
        self.controls.clone()
    }

    pub fn into_parts(self) -> (P, S) {
        (self.promise, self.controls)
    }
}

pub type DeferredOf<C, T, E> =
    Deferred<<C as Constructor>::Promise<T, E>, <C as Constructor>::Settler<T, E>, T, E>;

/// Builds a promise and hands its controls back to the caller.
///
/// # Panics
///
/// Panics if `ctor` returns from [`Constructor::construct`] without running
/// the setup procedure, which breaks the constructor contract.
pub fn deferred<C, T, E>(ctor: &C) -> DeferredOf<C, T, E>
where
    C: Constructor,
    T: Send + 'static,
    E: Send + 'static,
{
    let mut controls = None;
    let promise = ctor.construct(|settler| {
        controls = Some(settler);
        Ok(())
    });
    match controls {
        Some(controls) => Deferred {
            promise,
            controls,
            phantom: PhantomData,
        },
        None => unreachable!("constructor did not run its setup"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructor::Oneshot;
    use futures::future::{self, Pending};
    use crate::util::test::{run_in_tokio, Counting};
    use std::time::Duration;

    #[test]
    fn test_first_control_wins() {
        run_in_tokio(async move {
            let d = deferred::<_, i32, String>(&Oneshot);
            assert!(d.resolve(1));
            assert!(!d.reject("late".to_owned()));
            assert!(!d.resolve(2));
            assert_eq!(d.promise.await, Ok(1));

            let d = deferred::<_, i32, String>(&Oneshot);
            assert!(d.reject("first".to_owned()));
            assert!(!d.resolve(2));
            assert_eq!(d.promise.await, Err("first".to_owned()));
        });
    }

    #[test]
    fn test_settle_from_elsewhere() {
        run_in_tokio(async move {
            let ctor = Counting::default();
            let (promise, controls) = deferred::<_, &'static str, ()>(&ctor).into_parts();
            assert_eq!(ctor.constructed(), 1);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                controls.resolve("done");
            });
            assert_eq!(promise.await, Ok("done"));
        });
    }

    /// Breaks the contract by never running the setup procedure.
    #[derive(Clone)]
    struct SkipSetup;

    struct NoopSettler<T, E>(PhantomData<fn(T, E)>);

    impl<T, E> Clone for NoopSettler<T, E> {
        fn clone(&self) -> Self {
            NoopSettler(PhantomData)
        }
    }

    impl<T: Send + 'static, E: Send + 'static> Settle<T, E> for NoopSettler<T, E> {
        fn resolve(&self, _: T) -> bool {
            false
        }

        fn reject(&self, _: E) -> bool {
            false
        }
    }

    impl Constructor for SkipSetup {
        type Promise<T, E> = Pending<Result<T, E>>
        where
            T: Send + 'static,
            E: Send + 'static;

        type Settler<T, E> = NoopSettler<T, E>
        where
            T: Send + 'static,
            E: Send + 'static;

        fn construct<T, E, S>(&self, _setup: S) -> Pending<Result<T, E>>
        where
            T: Send + 'static,
            E: Send + 'static,
            S: FnOnce(NoopSettler<T, E>) -> Result<(), E>,
        {
            future::pending()
        }
    }

    #[test]
    #[should_panic(expected = "constructor did not run its setup")]
    fn test_setup_skipped_panics() {
        let _ = deferred::<_, (), ()>(&SkipSetup);
    }
}
