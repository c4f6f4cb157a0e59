//! A value cell that serializes every access through a lock.

use core::cell::UnsafeCell;
use core::fmt;
use core::mem;

use crate::lock::{DefaultLock, RawLock};

/// A container holding exactly one value, with all access mutually exclusive
/// across threads.
///
/// Every operation acquires the cell's lock, touches the value, and releases
/// the lock before returning (or before the supplied callback returns, for
/// [`modify`](Self::modify) and [`with_value`](Self::with_value)). The lock
/// and the value slot are private to the cell; no reference into the slot
/// ever escapes an operation.
///
/// Share the cell across threads by wrapping it in an
/// [`Arc`](std::sync::Arc); every clone of the handle serializes through the
/// same lock. The cell is [`Send`] and [`Sync`] whenever the payload is
/// [`Send`]; the payload does not need to be [`Sync`], since no two threads
/// ever observe it at once:
///
/// ```rust
/// use core::cell::Cell;
/// use vise::AtomicCell;
///
/// fn assert_sync<T: Sync>(_: &T) {}
///
/// let cell = AtomicCell::new(Cell::new(1u8));
/// assert_sync(&cell);
/// ```
///
/// A payload that is not [`Send`] cannot cross threads, cell or no cell:
///
/// ```compile_fail
/// use std::rc::Rc;
/// use vise::AtomicCell;
///
/// fn assert_sync<T: Sync>(_: &T) {}
///
/// let cell = AtomicCell::new(Rc::new(1u8));
/// assert_sync(&cell);
/// ```
///
/// # Callbacks and panics
///
/// The callbacks taken by [`modify`](Self::modify) and
/// [`with_value`](Self::with_value) run while the lock is held. Their
/// duration directly extends the critical section, and re-acquiring the same
/// cell from inside one deadlocks. If a callback panics, the lock is released
/// before the panic propagates and the cell keeps the last committed value;
/// the cell does not poison.
pub struct AtomicCell<T, L: RawLock = DefaultLock> {
    lock: L,
    slot: UnsafeCell<T>,
}

// SAFETY: sending the cell sends the payload with it, so `T: Send` is
// required and sufficient.
unsafe impl<T: Send, L: RawLock> Send for AtomicCell<T, L> {}

// SAFETY: a shared cell only touches the slot while holding the lock, so
// every access to the payload is exclusive; `T: Sync` is not needed.
unsafe impl<T: Send, L: RawLock> Sync for AtomicCell<T, L> {}

impl<T> AtomicCell<T> {
    /// Creates a cell holding `value`, backed by the platform's
    /// [`DefaultLock`]. Never fails.
    pub fn new(value: T) -> Self {
        Self::with_lock(value)
    }
}

impl<T, L: RawLock> AtomicCell<T, L> {
    /// Creates a cell holding `value`, backed by the lock named in the `L`
    /// type parameter.
    ///
    /// ```rust
    /// use vise::{AtomicCell, SpinLock};
    ///
    /// let cell: AtomicCell<u32, SpinLock> = AtomicCell::with_lock(7);
    /// assert_eq!(cell.get(), 7);
    /// ```
    pub fn with_lock(value: T) -> Self {
        Self {
            lock: L::new(),
            slot: UnsafeCell::new(value),
        }
    }

    /// Acquires the lock, returning the guard that releases it.
    ///
    /// Slot access is only permitted while the returned guard is live.
    fn guard(&self) -> Guard<'_, L> {
        self.lock.acquire();
        Guard { lock: &self.lock }
    }

    /// Returns a copy of the current value.
    ///
    /// The copy reflects one consistent write. It may already be stale by the
    /// time the caller observes it; nothing is guaranteed about what happens
    /// after the lock is released.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with_value(T::clone)
    }

    /// Overwrites the current value.
    ///
    /// The displaced value is dropped after the lock is released, so a
    /// payload `Drop` impl never runs inside the critical section.
    pub fn set(&self, value: T) {
        drop(self.swap(value));
    }

    /// Stores `value` and returns the value it displaced, in one lock round
    /// trip.
    pub fn swap(&self, value: T) -> T {
        let guard = self.guard();
        // SAFETY: the live guard witnesses exclusive slot access.
        let previous = unsafe { mem::replace(&mut *self.slot.get(), value) };
        drop(guard);
        previous
    }

    /// Stores `value` and returns the value it displaced.
    ///
    /// Identical to [`swap`](Self::swap); named to line up with
    /// [`core::cell::Cell::replace`].
    pub fn replace(&self, value: T) -> T {
        self.swap(value)
    }

    /// Takes the current value, leaving `T::default()` in its place.
    pub fn take(&self) -> T
    where
        T: Default,
    {
        self.swap(T::default())
    }

    /// Replaces the value with `transform` applied to it, returning the value
    /// that was current *before* the transform ran.
    ///
    /// `transform` is called exactly once, inside the critical section. If it
    /// panics, the panic propagates to the caller after the lock is released
    /// and the cell still holds the pre-transform value; the replacement was
    /// never produced.
    ///
    /// ```rust
    /// use vise::AtomicCell;
    ///
    /// let cell = AtomicCell::new(10u32);
    /// assert_eq!(cell.modify(|n| n * 2), 10);
    /// assert_eq!(cell.get(), 20);
    /// ```
    pub fn modify<F>(&self, transform: F) -> T
    where
        F: FnOnce(&T) -> T,
    {
        let guard = self.guard();
        // SAFETY: the live guard witnesses exclusive slot access.
        let slot = unsafe { &mut *self.slot.get() };
        let next = transform(slot);
        let previous = mem::replace(slot, next);
        drop(guard);
        previous
    }

    /// Calls `action` with the current value and returns its result, without
    /// writing anything back.
    ///
    /// `action` is called exactly once, inside the critical section; the same
    /// duration and re-entrancy caveats as [`modify`](Self::modify) apply. A
    /// panic in `action` propagates after the lock is released.
    pub fn with_value<U, F>(&self, action: F) -> U
    where
        F: FnOnce(&T) -> U,
    {
        let guard = self.guard();
        // SAFETY: the live guard witnesses exclusive slot access.
        let result = action(unsafe { &*self.slot.get() });
        drop(guard);
        result
    }

    /// Consumes the cell and returns the value it held.
    ///
    /// Ownership proves no other access exists, so no locking takes place.
    pub fn into_inner(self) -> T {
        self.slot.into_inner()
    }

    /// Returns a mutable reference to the value.
    ///
    /// The exclusive borrow statically guarantees no concurrent access, so no
    /// locking takes place.
    pub fn get_mut(&mut self) -> &mut T {
        self.slot.get_mut()
    }
}

impl<T: Default, L: RawLock> Default for AtomicCell<T, L> {
    fn default() -> Self {
        Self::with_lock(T::default())
    }
}

impl<T, L: RawLock> From<T> for AtomicCell<T, L> {
    fn from(value: T) -> Self {
        Self::with_lock(value)
    }
}

/// Formats without blocking: if the cell is locked by another thread the
/// value is shown as `<locked>`.
impl<T: fmt::Debug, L: RawLock> fmt::Debug for AtomicCell<T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AtomicCell");
        if self.lock.try_acquire() {
            let guard = Guard { lock: &self.lock };
            // SAFETY: the live guard witnesses exclusive slot access.
            builder.field("value", unsafe { &*self.slot.get() });
            drop(guard);
        } else {
            builder.field("value", &format_args!("<locked>"));
        }
        builder.finish()
    }
}

/// Releases the cell's lock on drop.
///
/// Every slot access in this module happens while one of these is live, which
/// is what guarantees release on every exit path, whether the operation
/// returns normally or a user callback unwinds.
struct Guard<'a, L: RawLock> {
    lock: &'a L,
}

impl<L: RawLock> Drop for Guard<'_, L> {
    fn drop(&mut self) {
        self.lock.release();
    }
}
