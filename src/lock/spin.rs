//! Test-and-test-and-set spin lock.

#[cfg(not(loom))]
use core::sync::atomic::{AtomicBool, Ordering};
#[cfg(loom)]
use loom::sync::atomic::{AtomicBool, Ordering};

#[cfg(not(loom))]
use crossbeam_utils::Backoff;

use super::RawLock;

/// A busy-wait mutual-exclusion lock.
///
/// Waiters poll the lock word rather than yielding to the scheduler, with
/// exponential backoff between attempts to keep the cache line from
/// ping-ponging under contention. Appropriate where critical sections are
/// short and context-switch cost exceeds expected wait time.
#[derive(Debug)]
pub struct SpinLock {
    locked: AtomicBool,
}

impl SpinLock {
    /// Creates an unlocked `SpinLock`.
    #[cfg(not(loom))]
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// Creates an unlocked `SpinLock`.
    ///
    /// Loom atomics cannot be constructed in const context.
    #[cfg(loom)]
    pub fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    #[cold]
    fn acquire_slow(&self) {
        #[cfg(not(loom))]
        {
            let backoff = Backoff::new();
            loop {
                // Read until the lock looks free before attempting the CAS
                // again; a failed CAS invalidates the line for every waiter.
                while self.locked.load(Ordering::Relaxed) {
                    backoff.spin();
                }
                if self
                    .locked
                    .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
                    .is_ok()
                {
                    return;
                }
            }
        }
        #[cfg(loom)]
        {
            loop {
                while self.locked.load(Ordering::Relaxed) {
                    loom::thread::yield_now();
                }
                if self
                    .locked
                    .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
                    .is_ok()
                {
                    return;
                }
                loom::thread::yield_now();
            }
        }
    }
}

impl RawLock for SpinLock {
    #[inline]
    fn new() -> Self {
        SpinLock::new()
    }

    #[inline]
    fn acquire(&self) {
        if self.try_acquire() {
            return;
        }
        self.acquire_slow();
    }

    #[inline]
    fn try_acquire(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    #[inline]
    fn release(&self) {
        self.locked.store(false, Ordering::Release);
    }
}

impl Default for SpinLock {
    fn default() -> Self {
        Self::new()
    }
}
