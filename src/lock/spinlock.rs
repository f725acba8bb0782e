use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_utils::Backoff;

use super::{RawSimpleLock, SimpleLock};

/// test-and-test-and-set lock that spins with exponential backoff
pub struct RawSpinLock {
    flag: AtomicBool,
}

impl RawSpinLock {
    pub const fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }
}

impl Default for RawSpinLock {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl RawSimpleLock for RawSpinLock {
    #[inline]
    fn new() -> Self {
        RawSpinLock::new()
    }

    #[inline]
    fn try_lock(&self) -> bool {
        self.flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    fn lock(&self) {
        let backoff = Backoff::new();

        loop {
            if self
                .flag
                .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
                .is_ok()
            {
                return;
            }

            // wait on plain loads so the cache line is not bounced by failing writes
            while self.flag.load(Ordering::Relaxed) {
                backoff.snooze();
            }
        }
    }

    #[inline]
    fn unlock(&self) {
        self.flag.store(false, Ordering::Release);
    }
}

pub type SpinLock<T> = SimpleLock<RawSpinLock, T>;
