//! Racing a future against the host timer.
//!
//! [`timeout`] produces a new promise that settles like the input future if
//! it finishes in time, and otherwise rejects with a [`TimedOut`] error. The
//! input is never cancelled: it runs on its own task and keeps going after
//! the deadline, only its observer gives up.

use std::future::Future;
use std::time::Duration;
use tokio::runtime::Handle;

use crate::constructor::Constructor;
use crate::util::{Error, Result, SettleOnce, TimedOut, DEFAULT_TIMEOUT_MESSAGE};

/// A timeout as requested by the caller and the delay actually waited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deadline {
    requested_ms: f64,
    delay: Duration,
}

impl Deadline {
    /// Negative requests wait nothing; requests too large for a `Duration`
    /// wait `Duration::MAX`.
    fn from_millis(requested_ms: f64) -> Deadline {
        let delay = Duration::try_from_secs_f64(requested_ms.max(0.0) / 1000.0)
            .unwrap_or(Duration::MAX);
        Deadline {
            requested_ms,
            delay,
        }
    }

    #[inline]
    pub fn requested_ms(&self) -> f64 {
        self.requested_ms
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Values accepted as a timeout duration.
///
/// Plain numbers are milliseconds. Negative values fire immediately.
pub trait IntoTimeout {
    fn into_timeout(self) -> Result<Deadline>;
}

impl IntoTimeout for Duration {
    fn into_timeout(self) -> Result<Deadline> {
        Ok(Deadline {
            requested_ms: self.as_secs_f64() * 1000.0,
            delay: self,
        })
    }
}

macro_rules! integer_timeout {
    ($($t:ty),*) => {
        $(
            impl IntoTimeout for $t {
                fn into_timeout(self) -> Result<Deadline> {
                    (self as f64).into_timeout()
                }
            }
        )*
    };
}

integer_timeout!(i32, i64, u32, u64);

impl IntoTimeout for f64 {
    fn into_timeout(self) -> Result<Deadline> {
        if !self.is_finite() {
            return Err(Error::InvalidDuration(self.to_string()));
        }
        Ok(Deadline::from_millis(self))
    }
}

impl IntoTimeout for &str {
    fn into_timeout(self) -> Result<Deadline> {
        match self.trim().parse::<f64>() {
            Ok(ms) if ms.is_finite() => ms.into_timeout(),
            _ => Err(Error::InvalidDuration(self.to_owned())),
        }
    }
}

/// Races `future` against a timer of `duration`.
///
/// Fails without constructing anything if the duration is not a number or
/// no tokio runtime is running. Otherwise the returned promise fulfils or
/// rejects with the input's outcome if that arrives first, or rejects with
/// a [`TimedOut`] carrying `message` (default `"Timeout"`) and the duration.
pub fn timeout<C, D, F, T, E>(
    ctor: &C,
    duration: D,
    future: F,
    message: Option<&str>,
) -> Result<C::Promise<T, E>>
where
    C: Constructor,
    D: IntoTimeout,
    F: Future<Output = std::result::Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: From<TimedOut> + Send + 'static,
{
    let deadline = duration.into_timeout()?;
    let handle = Handle::try_current().map_err(|_| Error::NoRuntime("timeout"))?;
    let message = message.unwrap_or(DEFAULT_TIMEOUT_MESSAGE).to_owned();

    Ok(ctor.construct(move |settler| {
        let guard: SettleOnce<T, E, _> = SettleOnce::new(settler);

        let timer = {
            let guard = guard.clone();
            handle.spawn(async move {
                let delay = deadline.delay();
                tokio::time::sleep(delay).await;
                let e = TimedOut::new(message, deadline.requested_ms(), delay);
                if guard.settle(Err(e.into())) {
                    log::debug!("promise timed out after {:?}", delay);
                }
            })
        };

        handle.spawn(async move {
            let outcome = future.await;
            // Releases the timer if it has not fired yet.
            timer.abort();
            guard.settle(outcome);
        });

        Ok(())
    }))
}
