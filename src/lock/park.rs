//! Blocking lock that parks waiters on the platform wait primitive.

use core::sync::atomic::{AtomicU32, Ordering};

use super::RawLock;

#[cfg(target_os = "linux")]
use libc::{SYS_futex, FUTEX_PRIVATE_FLAG, FUTEX_WAIT, FUTEX_WAKE};

#[cfg(windows)]
use windows_sys::Win32::System::Threading::{WaitOnAddress, WakeByAddressSingle};

const UNLOCKED: u32 = 0;
const LOCKED: u32 = 1;
const CONTENDED: u32 = 2;

/// Attempts made on-core before a waiter parks.
const SPIN_LIMIT: u32 = 40;

/// A general-purpose mutual-exclusion lock.
///
/// The lock word has three states: unlocked, locked with no waiters, and
/// contended. Uncontended acquire and release are a single compare-exchange
/// each; a contended acquire spins briefly, then parks the thread on the lock
/// word (futex on Linux, `WaitOnAddress` on Windows) until a release wakes
/// it.
#[derive(Debug)]
pub struct ParkingLock {
    state: AtomicU32,
}

impl ParkingLock {
    /// Creates an unlocked `ParkingLock`.
    pub const fn new() -> Self {
        Self {
            state: AtomicU32::new(UNLOCKED),
        }
    }

    #[cold]
    fn acquire_slow(&self) {
        // Spin while the holder is likely mid-critical-section on another
        // core; parking costs two syscalls.
        let mut spin = 0;
        while spin < SPIN_LIMIT {
            if self.state.load(Ordering::Relaxed) == UNLOCKED
                && self
                    .state
                    .compare_exchange(UNLOCKED, LOCKED, Ordering::Acquire, Ordering::Relaxed)
                    .is_ok()
            {
                return;
            }
            spin += 1;
            core::hint::spin_loop();
        }

        // Once the state has been marked contended it must stay contended
        // through this acquisition, so the eventual release wakes a waiter.
        while self.state.swap(CONTENDED, Ordering::Acquire) != UNLOCKED {
            wait(&self.state, CONTENDED);
        }
    }

    #[cold]
    fn release_slow(&self) {
        wake_one(&self.state);
    }
}

impl RawLock for ParkingLock {
    #[inline]
    fn new() -> Self {
        ParkingLock::new()
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
        self.state
            .compare_exchange(UNLOCKED, LOCKED, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    #[inline]
    fn release(&self) {
        if self.state.swap(UNLOCKED, Ordering::Release) == CONTENDED {
            self.release_slow();
        }
    }
}

impl Default for ParkingLock {
    fn default() -> Self {
        Self::new()
    }
}

/// Parks the thread until the state word no longer holds `expected`.
///
/// The kernel re-checks the word under its own lock, so a stale read here
/// just returns immediately and the caller's loop retries.
#[cfg(target_os = "linux")]
#[inline]
fn wait(state: &AtomicU32, expected: u32) {
    unsafe {
        libc::syscall(
            SYS_futex,
            state as *const AtomicU32 as *const u32,
            FUTEX_WAIT | FUTEX_PRIVATE_FLAG,
            expected,
            core::ptr::null::<libc::timespec>(),
        );
    }
}

#[cfg(target_os = "linux")]
#[inline]
fn wake_one(state: &AtomicU32) {
    unsafe {
        libc::syscall(
            SYS_futex,
            state as *const AtomicU32 as *const u32,
            FUTEX_WAKE | FUTEX_PRIVATE_FLAG,
            1,
        );
    }
}

/// Parks the thread until the state word no longer holds `expected`.
#[cfg(windows)]
#[inline]
fn wait(state: &AtomicU32, expected: u32) {
    unsafe {
        WaitOnAddress(
            state as *const AtomicU32 as *const _,
            core::ptr::from_ref(&expected).cast(),
            core::mem::size_of::<u32>(),
            u32::MAX,
        );
    }
}

#[cfg(windows)]
#[inline]
fn wake_one(state: &AtomicU32) {
    unsafe {
        WakeByAddressSingle(state as *const AtomicU32 as *const _);
    }
}
