use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::constructor::Settle;

/// Settlement guard shared by handlers racing to settle the same promise.
///
/// Whichever handler calls [`SettleOnce::settle`] first flips the flag and
/// forwards its outcome; everyone after that is ignored.
pub struct SettleOnce<T, E, S> {
    settler: S,
    settled: Arc<AtomicBool>,
    phantom: PhantomData<fn(T, E)>,
}

impl<T, E, S: Settle<T, E>> SettleOnce<T, E, S> {
    pub fn new(settler: S) -> Self {
        Self {
            settler,
            settled: Arc::new(AtomicBool::new(false)),
            phantom: PhantomData,
        }
    }

    pub fn settle(&self, outcome: Result<T, E>) -> bool {
        if self.settled.swap(true, Ordering::AcqRel) {
            log::trace!("promise already settled, outcome ignored");
            return false;
        }
        self.settler.settle(outcome)
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.settled.load(Ordering::Acquire)
    }
}

impl<T, E, S: Clone> Clone for SettleOnce<T, E, S> {
    fn clone(&self) -> Self {
        Self {
            settler: self.settler.clone(),
            settled: self.settled.clone(),
            phantom: PhantomData,
        }
    }
}
