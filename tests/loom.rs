//! Loom model checks for the spin lock's acquisition protocol.
//!
//! Run with `RUSTFLAGS="--cfg loom" cargo test --test loom --release`. Scope
//! is the spin lock only: loom cannot model the futex/`WaitOnAddress`
//! syscalls behind `ParkingLock`, whose protocol is instead covered by the
//! stress tests.
#![cfg(loom)]

use loom::cell::UnsafeCell;
use loom::sync::Arc;
use loom::thread;

use vise::lock::RawLock;
use vise::SpinLock;

#[test]
fn spin_lock_provides_mutual_exclusion() {
    loom::model(|| {
        let lock = Arc::new(SpinLock::new());
        let slot = Arc::new(UnsafeCell::new(0u32));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let lock = Arc::clone(&lock);
                let slot = Arc::clone(&slot);
                thread::spawn(move || {
                    lock.acquire();
                    // Loom flags the access itself if two threads ever hold
                    // the lock at once.
                    slot.with_mut(|p| unsafe { *p += 1 });
                    lock.release();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let total = slot.with(|p| unsafe { *p });
        assert_eq!(total, 2);
    });
}

#[test]
fn try_acquire_never_grants_twice() {
    loom::model(|| {
        let lock = Arc::new(SpinLock::new());
        let slot = Arc::new(UnsafeCell::new(0u32));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let lock = Arc::clone(&lock);
                let slot = Arc::clone(&slot);
                thread::spawn(move || {
                    if lock.try_acquire() {
                        slot.with_mut(|p| unsafe { *p += 1 });
                        lock.release();
                        true
                    } else {
                        false
                    }
                })
            })
            .collect();
        let granted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|granted| *granted)
            .count() as u32;

        // Every successful try_acquire performed exactly one increment.
        let total = slot.with(|p| unsafe { *p });
        assert_eq!(total, granted);
        assert!(granted >= 1, "at least one attempt must succeed");
    });
}
