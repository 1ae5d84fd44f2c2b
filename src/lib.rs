//! Bridges between callback-style functions and futures, plus a timeout race
//! and deferred promises.
//!
//! Nothing here is tied to one promise implementation. Every operation that
//! builds a promise takes a [`Constructor`] as its first argument;
//! [`with_constructor`] binds one across the whole surface.
//!
//! ```no_run
//! use promise_helpers::{with_constructor, Error, Oneshot};
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), Error> {
//! let helpers = with_constructor(Oneshot);
//! let d = helpers.deferred::<u32, Error>();
//! let raced = helpers.timeout(Duration::from_secs(1), d.promise, None)?;
//! assert!(raced.await.is_err());
//! # Ok(())
//! # }
//! ```
pub mod bind;
pub mod callback;
pub mod constructor;
pub mod deferred;
pub mod event;
pub mod promisify;
pub mod race;
pub mod util;

pub use bind::{with_constructor, Bound, Operation};
pub use callback::{callback, from_callback};
pub use constructor::{Constructor, Oneshot, Settle};
pub use deferred::{deferred, Deferred};
pub use event::{event_to_promise, Emitter, EventEmitter};
pub use promisify::promisify;
pub use race::{timeout, Deadline, IntoTimeout};
pub use util::{Arity, Error, Result, TimedOut};
