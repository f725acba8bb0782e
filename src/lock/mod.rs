mod mutex;
mod spinlock;

pub use mutex::{Mutex, RawMutex};
pub use spinlock::RawSpinLock;
pub use spinlock::SpinLock;

use std::{
    cell::UnsafeCell,
    marker::PhantomData,
    ops::{Deref, DerefMut},
};

/// A raw lock without data.
///
/// Implementors must guarantee that between a successful `lock`/`try_lock` and the matching
/// `unlock`, no other caller acquires the lock.
pub unsafe trait RawSimpleLock {
    fn new() -> Self;

    /// Non-blocking: Try locking. If succeeding, return true, or false.
    fn try_lock(&self) -> bool;

    /// Blocking: Get locking or wait until getting locking
    fn lock(&self);

    /// Release lock
    fn unlock(&self);
}

/// Data protected by a raw lock. The lock is released when the guard is dropped,
/// including while unwinding.
pub struct SimpleLock<R, T> {
    raw: R,
    data: UnsafeCell<T>,
}

unsafe impl<R: RawSimpleLock + Send, T: Send> Send for SimpleLock<R, T> {}
unsafe impl<R: RawSimpleLock + Sync, T: Send> Sync for SimpleLock<R, T> {}

/// Unlocks on drop. It cannot leave the thread that locked, since a blocking raw lock may
/// require being released by its owner.
pub struct Guard<'s, R: RawSimpleLock, T> {
    lock: &'s SimpleLock<R, T>,
    _not_send: PhantomData<*const ()>,
}

unsafe impl<'s, R: RawSimpleLock + Sync, T: Send + Sync> Sync for Guard<'s, R, T> {}

impl<R: RawSimpleLock, T> SimpleLock<R, T> {
    pub fn new(data: T) -> Self {
        Self {
            raw: R::new(),
            data: UnsafeCell::new(data),
        }
    }

    pub fn lock(&self) -> Guard<'_, R, T> {
        self.raw.lock();

        Guard {
            lock: self,
            _not_send: PhantomData,
        }
    }

    pub fn try_lock(&self) -> Option<Guard<'_, R, T>> {
        if self.raw.try_lock() {
            Some(Guard {
                lock: self,
                _not_send: PhantomData,
            })
        } else {
            None
        }
    }

    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }

    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }
}

impl<'s, R: RawSimpleLock, T> Deref for Guard<'s, R, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        unsafe { &*self.lock.data.get() }
    }
}

impl<'s, R: RawSimpleLock, T> DerefMut for Guard<'s, R, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<'s, R: RawSimpleLock, T> Drop for Guard<'s, R, T> {
    fn drop(&mut self) {
        self.lock.raw.unlock();
    }
}
