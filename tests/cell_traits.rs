//! Auto-trait and marker bounds of the public types.

use core::cell::Cell;

use vise::{AtomicCell, DefaultLock, SpinLock};

fn assert_send<T: Send>() {}
fn assert_sync<T: Sync>() {}

#[test]
fn cell_is_send_and_sync_for_send_payloads() {
    assert_send::<AtomicCell<Vec<u8>>>();
    assert_sync::<AtomicCell<Vec<u8>>>();
}

#[test]
fn payload_need_not_be_sync() {
    // `Cell<u8>` is Send but !Sync; the lock supplies the exclusion.
    assert_send::<AtomicCell<Cell<u8>>>();
    assert_sync::<AtomicCell<Cell<u8>>>();
}

#[test]
fn both_lock_backends_are_shareable() {
    assert_sync::<AtomicCell<u64, SpinLock>>();
    assert_sync::<AtomicCell<u64, DefaultLock>>();
    assert_sync::<SpinLock>();
    assert_sync::<DefaultLock>();
}
