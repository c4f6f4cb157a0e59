//! # `vise` - Mutual-Exclusion Value Cell
//!
//! A vise grips one thing at a time. This crate provides [`AtomicCell`], a
//! container holding exactly one value whose every read, write, and
//! read-modify-write is serialized through a lock, so concurrent code can
//! share mutable state without hand-rolling lock bookkeeping at each call
//! site.
//!
//! ## Guarantees
//!
//! - **Mutual exclusion**: at most one thread touches the contained value at
//!   any instant. No operation can observe a partially-written value.
//! - **Minimal critical sections**: the lock is held for exactly one logical
//!   operation and released on every exit path, including when a
//!   user-supplied callback panics.
//! - **Serialization, not ordering**: concurrent operations on one cell never
//!   interleave, but no FIFO or priority guarantee is made about which waiter
//!   acquires next. Operations on distinct cells are fully independent.
//!
//! ## Lock backends
//!
//! The cell is written once against the [`RawLock`] capability; the concrete
//! lock is an injected policy chosen through a type parameter. Two backends
//! are provided:
//!
//! - [`ParkingLock`](lock::ParkingLock) (Linux and Windows): a three-state
//!   mutex that spins briefly, then parks the thread on the platform wait
//!   primitive (futex, `WaitOnAddress`).
//! - [`SpinLock`]: a test-and-test-and-set busy-wait lock, suitable where
//!   context-switch cost exceeds expected contention.
//!
//! [`DefaultLock`] names the backend that fits the current target; most code
//! never spells out a lock type at all.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use vise::AtomicCell;
//!
//! let cell = Arc::new(AtomicCell::new(0u64));
//!
//! let workers: Vec<_> = (0..4)
//!     .map(|_| {
//!         let cell = Arc::clone(&cell);
//!         thread::spawn(move || {
//!             for _ in 0..1000 {
//!                 cell.modify(|n| n + 1);
//!             }
//!         })
//!     })
//!     .collect();
//! for worker in workers {
//!     worker.join().unwrap();
//! }
//!
//! assert_eq!(cell.get(), 4000);
//! ```
//!
//! ## What this crate is not
//!
//! There are no condition variables, no reader/writer asymmetry, no
//! re-entrant locking, no deadlock detection, no cancellation or timeouts,
//! and no cross-process synchronization. A callback passed to
//! [`AtomicCell::modify`] or [`AtomicCell::with_value`] runs inside the
//! critical section and must not touch the same cell again.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod cell;
pub mod lock;

pub use cell::AtomicCell;
#[cfg(any(target_os = "linux", windows))]
pub use lock::ParkingLock;
pub use lock::{DefaultLock, RawLock, SpinLock};
