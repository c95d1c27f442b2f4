//! # gyre-core — The "Ring" of GYRE
//!
//! A circular buffer that appends at the tail and removes from the head by
//! wrapping indices modulo capacity, never shifting elements.
//!
//! The buffer is assembled from two compile-time strategies:
//!
//! - A [`Storage`] that owns the physical slots ([`ArrayStorage`] on the
//!   stack, [`VecStorage`] on the heap).
//! - An [`OverwritePolicy`] that decides what an append does when the ring
//!   is full ([`NoOverwrite`] rejects it, [`Overwrite`] evicts the oldest).
//!
//! ```text
//!  physical:  [ c ][ d ][   ][   ][ a ][ b ]
//!                        ^tail     ^head
//!  logical:   a b c d           (first span: a b, second span: c d)
//! ```
//!
//! The crate is `no_std`. The `alloc` feature (default) enables
//! [`VecStorage`]; the `std` feature adds `std::io` adapters for byte rings.

#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod cursor;
pub mod dump;
pub mod error;
pub mod policy;
pub mod ring;
pub mod storage;

#[cfg(feature = "std")]
mod io;

pub use cursor::{Cursor, Iter, IterMut, Position};
pub use dump::Dump;
pub use error::{RingError, Result};
pub use policy::{NoOverwrite, Overwrite, OverwritePolicy, ParsePolicyError, PolicyKind};
pub use ring::RingBuffer;
pub use storage::{ArrayStorage, Storage};

#[cfg(feature = "alloc")]
pub use storage::VecStorage;

/// A ring living entirely on the stack with `N` slots.
pub type StackRing<T, const N: usize, P = NoOverwrite> = RingBuffer<ArrayStorage<T, N>, P>;

/// A ring whose slots are allocated once on the heap.
#[cfg(feature = "alloc")]
pub type HeapRing<T, P = NoOverwrite> = RingBuffer<VecStorage<T>, P>;
