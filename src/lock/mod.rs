//! Lock backends for [`AtomicCell`](crate::AtomicCell).
//!
//! The cell's logic is written once against the [`RawLock`] capability; which
//! concrete lock backs a given cell is an injected policy, not a branch in
//! the cell's own code. [`DefaultLock`] selects the backend that fits the
//! compilation target: the parking lock where the platform offers an
//! address-wait primitive, the spin lock elsewhere.

#[cfg(any(target_os = "linux", windows))]
mod park;
mod spin;

#[cfg(any(target_os = "linux", windows))]
pub use park::ParkingLock;
pub use spin::SpinLock;

/// A mutual-exclusion capability: something that can be held by at most one
/// thread at a time.
///
/// Implementations decide *how* a waiter waits (busy-wait, park, ...); the
/// contract is only about exclusion. Locks start life unlocked and are
/// unshared outside the structure that owns them.
pub trait RawLock: Send + Sync {
    /// Creates the lock in the unlocked state. Never fails.
    fn new() -> Self;

    /// Acquires the lock, blocking the calling thread until it is held.
    ///
    /// There is no deadline and no way to abort a pending acquisition.
    /// Acquiring a lock the current thread already holds deadlocks.
    fn acquire(&self);

    /// Makes a single attempt to acquire the lock without blocking.
    ///
    /// Returns `true` if the lock is now held by the caller.
    fn try_acquire(&self) -> bool;

    /// Releases the lock.
    ///
    /// The caller must currently hold the lock. Releasing a lock that is not
    /// held hands exclusion to two threads at once; implementations do not
    /// detect this.
    fn release(&self);
}

/// The lock backing [`AtomicCell`](crate::AtomicCell) unless one is chosen
/// explicitly.
#[cfg(any(target_os = "linux", windows))]
pub type DefaultLock = ParkingLock;

/// The lock backing [`AtomicCell`](crate::AtomicCell) unless one is chosen
/// explicitly.
#[cfg(not(any(target_os = "linux", windows)))]
pub type DefaultLock = SpinLock;
