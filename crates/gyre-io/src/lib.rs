//! # gyre-io — The "Plumbing" of GYRE
//!
//! Byte-oriented helpers around `gyre-core` rings:
//! memory-mapped slot storage, content checksums, and reader/writer pumps.

pub mod digest;
pub mod mmap;
pub mod stream;

pub use digest::checksum;
pub use mmap::MmapStorage;
pub use stream::{drain_to, fill_from};
