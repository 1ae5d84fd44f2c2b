use crate::constructor::{Constructor, Settle};

mod emitter;
pub use emitter::EventEmitter;

/// Anything that can register a listener called at most once for an event.
pub trait Emitter<P> {
    /// Registers `listener` for the next occurrence of `event` only.
    fn once(&self, event: &str, listener: Box<dyn FnOnce(P) + Send>);
}

/// Returns a promise fulfilled with the payload of the first `event` fired
/// on `emitter`.
///
/// It never rejects and stays pending if the event never fires; race it
/// with [`crate::race::timeout`] to bound the wait.
pub fn event_to_promise<C, M, P, E>(ctor: &C, emitter: &M, event: &str) -> C::Promise<P, E>
where
    C: Constructor,
    M: Emitter<P> + ?Sized,
    P: Send + 'static,
    E: Send + 'static,
{
    ctor.construct(|settler| {
        emitter.once(
            event,
            Box::new(move |payload| {
                settler.resolve(payload);
            }),
        );
        Ok(())
    })
}
