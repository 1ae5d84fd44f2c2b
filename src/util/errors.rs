use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::result::Result as stdResult;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = stdResult<T, Error>;

/// Message carried by a [`TimedOut`] error when the caller supplies none.
pub const DEFAULT_TIMEOUT_MESSAGE: &str = "Timeout";

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} must be a timeout number")]
    InvalidDuration(String),
    #[error("{0} requires a tokio runtime")]
    NoRuntime(&'static str),
    #[error(transparent)]
    Timeout(#[from] TimedOut),
    #[error("{0}")]
    Rejected(Box<dyn StdError + Send + Sync>),
    #[error("promise rejected with non-error (on .original)")]
    NonError(Original),
}

impl Error {
    /// Wraps a rejection reason that is not an error.
    pub fn non_error<V>(value: V) -> Error
    where
        V: Any + fmt::Debug + Send + Sync,
    {
        Error::NonError(Original::new(value))
    }

    /// The raw rejection value of a [`Error::NonError`].
    pub fn original(&self) -> Option<&Original> {
        match self {
            Error::NonError(original) => Some(original),
            _ => None,
        }
    }
}

/// Raised when a raced future does not settle before its deadline.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct TimedOut {
    message: String,
    requested_ms: f64,
    duration: Duration,
}

impl TimedOut {
    /// `requested_ms` is the timeout as the caller gave it, `duration` the
    /// delay actually waited.
    pub fn new(message: impl Into<String>, requested_ms: f64, duration: Duration) -> TimedOut {
        TimedOut {
            message: message.into(),
            requested_ms,
            duration,
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The delay waited. Negative requests are clamped to zero and requests
    /// beyond `Duration::MAX` to `Duration::MAX`.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The configured timeout in milliseconds, unclamped.
    #[inline]
    pub fn duration_ms(&self) -> f64 {
        self.requested_ms
    }
}

/// A rejection value kept verbatim for inspection by the callback receiver.
pub struct Original {
    value: Box<dyn Any + Send + Sync>,
    debug: String,
}

impl Original {
    fn new<V>(value: V) -> Original
    where
        V: Any + fmt::Debug + Send + Sync,
    {
        let debug = format!("{:?}", value);
        Original {
            value: Box::new(value),
            debug,
        }
    }

    pub fn downcast_ref<V: Any>(&self) -> Option<&V> {
        self.value.downcast_ref()
    }

    pub fn is<V: Any>(&self) -> bool {
        self.value.is::<V>()
    }
}

impl fmt::Debug for Original {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Original").field(&format_args!("{}", self.debug)).finish()
    }
}

/// Turns a rejection reason into the error handed to a completion callback.
///
/// Error values pass through; anything else is wrapped in
/// [`Error::NonError`] so the callback always receives an error.
pub trait IntoCallbackError {
    fn into_callback_error(self) -> Error;
}

impl IntoCallbackError for Error {
    fn into_callback_error(self) -> Error {
        self
    }
}

impl IntoCallbackError for TimedOut {
    fn into_callback_error(self) -> Error {
        Error::Timeout(self)
    }
}

impl IntoCallbackError for Box<dyn StdError + Send + Sync> {
    fn into_callback_error(self) -> Error {
        Error::Rejected(self)
    }
}

impl IntoCallbackError for std::io::Error {
    fn into_callback_error(self) -> Error {
        Error::Rejected(Box::new(self))
    }
}

macro_rules! non_error_reason {
    ($($t:ty),*) => {
        $(
            impl IntoCallbackError for $t {
                fn into_callback_error(self) -> Error {
                    log::debug!("wrapping non-error rejection {:?}", self);
                    Error::non_error(self)
                }
            }
        )*
    };
}

non_error_reason!(String, &'static str, bool, (), i32, i64, u32, u64, usize, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_out_display() {
        let e: Error = TimedOut::new(DEFAULT_TIMEOUT_MESSAGE, 10.0, Duration::from_millis(10)).into();
        assert_eq!(e.to_string(), "Timeout");
        match e {
            Error::Timeout(t) => {
                assert_eq!(t.duration_ms(), 10.0);
                assert_eq!(t.duration(), Duration::from_millis(10));
                assert_eq!(t.message(), "Timeout");
            }
            _ => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn test_non_error_reason() {
        let e = "boom".to_owned().into_callback_error();
        assert_eq!(e.to_string(), "promise rejected with non-error (on .original)");
        let original = e.original().unwrap();
        assert!(original.is::<String>());
        assert_eq!(original.downcast_ref::<String>().unwrap(), "boom");
        assert_eq!(format!("{:?}", original), "Original(\"boom\")");

        let e = 42i32.into_callback_error();
        assert_eq!(e.original().unwrap().downcast_ref::<i32>(), Some(&42));
    }

    #[test]
    fn test_error_reason_passes_through() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let e = io.into_callback_error();
        assert!(e.original().is_none());
        assert_eq!(e.to_string(), "disk");

        let e = Error::InvalidDuration("abc".to_owned()).into_callback_error();
        assert_eq!(e.to_string(), "abc must be a timeout number");
    }
}
