//! Shared counter: many threads bump one cell through `Arc` handles.

use std::sync::Arc;
use std::thread;

use vise::AtomicCell;

fn main() {
    let cell = Arc::new(AtomicCell::new(0u64));

    let workers: Vec<_> = (0..8)
        .map(|worker| {
            let cell = Arc::clone(&cell);
            thread::spawn(move || {
                for _ in 0..10_000 {
                    cell.modify(|n| n + 1);
                }
                println!("worker {worker} done");
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    println!("final count: {}", cell.get());

    let drained = cell.swap(0);
    println!("drained {drained}, counter reset to {}", cell.get());
}
