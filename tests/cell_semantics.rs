//! Cross-thread behavior of the cell: blocking, visibility, serialization.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use vise::AtomicCell;

#[test]
fn writes_are_visible_across_threads() {
    let cell = Arc::new(AtomicCell::new(0u64));
    let writer = {
        let cell = Arc::clone(&cell);
        thread::spawn(move || cell.set(99))
    };
    writer.join().unwrap();
    assert_eq!(cell.get(), 99);
}

#[test]
fn operations_block_while_a_callback_holds_the_lock() {
    let cell = AtomicCell::new(0u32);
    let cell = &cell;

    thread::scope(|s| {
        s.spawn(move || {
            cell.with_value(|_| {
                thread::sleep(Duration::from_millis(50));
            });
        });

        s.spawn(move || {
            thread::sleep(Duration::from_millis(10));
            // Must wait for the first thread's critical section to end.
            cell.set(1);
        });
    });

    assert_eq!(cell.get(), 1);
}

#[test]
fn modify_sees_the_latest_committed_value() {
    let cell = AtomicCell::new(0u64);
    let cell = &cell;

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(move || {
                for _ in 0..100 {
                    let previous = cell.modify(|n| n + 1);
                    // Serialized increments: the previous value is always
                    // strictly below the final total.
                    assert!(previous < 800);
                }
            });
        }
    });

    assert_eq!(cell.get(), 800);
}

#[test]
fn callback_results_flow_back_to_the_calling_thread() {
    let cell = Arc::new(AtomicCell::new(String::from("shared")));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cell = Arc::clone(&cell);
            thread::spawn(move || cell.with_value(String::len))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 6);
    }
}
