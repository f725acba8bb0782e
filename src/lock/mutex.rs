use parking_lot::lock_api::RawMutex as _;

use super::{RawSimpleLock, SimpleLock};

/// Blocking lock backed by parking_lot. Waiting threads park instead of spinning, so a long
/// critical section (one whole tree insertion) does not burn the other cores.
pub struct RawMutex(parking_lot::RawMutex);

impl Default for RawMutex {
    fn default() -> Self {
        Self(parking_lot::RawMutex::INIT)
    }
}

unsafe impl RawSimpleLock for RawMutex {
    #[inline]
    fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn try_lock(&self) -> bool {
        self.0.try_lock()
    }

    #[inline]
    fn lock(&self) {
        self.0.lock();
    }

    #[inline]
    fn unlock(&self) {
        // SAFETY: only the guard that acquired the lock releases it
        unsafe { self.0.unlock() };
    }
}

pub type Mutex<T> = SimpleLock<RawMutex, T>;
