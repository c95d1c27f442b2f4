//! # Digest — CRC32 of Ring Contents
//!
//! Checksums the logical byte sequence, so two rings holding the same bytes
//! agree regardless of where their `head` sits.

use crc32fast::Hasher;

use gyre_core::{OverwritePolicy, RingBuffer, Storage};

/// CRC32 over the ring's bytes in logical order.
pub fn checksum<S, P>(ring: &RingBuffer<S, P>) -> u32
where
    S: Storage<Item = u8>,
    P: OverwritePolicy,
{
    let (first, second) = ring.as_slices();
    let mut hasher = Hasher::new();
    hasher.update(first);
    hasher.update(second);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyre_core::{HeapRing, Overwrite, StackRing};

    #[test]
    fn test_checksum_matches_flat_bytes() {
        let mut rb = StackRing::<u8, 8>::new();
        rb.push_back_iter(*b"payload");
        assert_eq!(checksum(&rb), crc32fast::hash(b"payload"));
    }

    #[test]
    fn test_checksum_ignores_head_position() {
        let mut wrapped = StackRing::<u8, 4, Overwrite>::new();
        wrapped.push_back_iter(*b"xyzabc");
        assert!(!wrapped.is_contiguous());

        let mut flat = HeapRing::<u8>::with_capacity(4);
        flat.push_back_iter(*b"zabc");

        assert_eq!(checksum(&wrapped), checksum(&flat));
        assert_eq!(checksum(&wrapped), crc32fast::hash(b"zabc"));
    }

    #[test]
    fn test_checksum_of_empty_ring() {
        let rb = HeapRing::<u8>::with_capacity(3);
        assert_eq!(checksum(&rb), crc32fast::hash(b""));
    }
}
