//! # Storage — Physical Slots Behind a Ring
//!
//! A [`Storage`] owns a fixed run of slots and reports how many there are.
//! The ring never asks a storage to grow: [`Storage::initialize`] is called
//! once, at construction, and from then on `capacity()` is the modulus for
//! every index computation.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Backing store for a [`RingBuffer`](crate::RingBuffer).
pub trait Storage {
    /// Element type held in each slot.
    type Item;

    /// Prepare at least `requested` slots. Called exactly once by
    /// [`RingBuffer::with_storage`](crate::RingBuffer::with_storage).
    fn initialize(&mut self, requested: usize);

    /// Number of addressable physical slots.
    fn capacity(&self) -> usize;

    /// All physical slots, slot 0 first.
    fn slots(&self) -> &[Self::Item];

    /// All physical slots, slot 0 first.
    fn slots_mut(&mut self) -> &mut [Self::Item];
}

/// Inline array storage with a compile-time capacity of `N` slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayStorage<T, const N: usize> {
    slots: [T; N],
}

impl<T, const N: usize> ArrayStorage<T, N> {
    /// Adopt an existing array as the initial slot contents.
    pub const fn from_array(slots: [T; N]) -> Self {
        Self { slots }
    }
}

impl<T: Default, const N: usize> Default for ArrayStorage<T, N> {
    fn default() -> Self {
        Self {
            slots: core::array::from_fn(|_| T::default()),
        }
    }
}

impl<T, const N: usize> Storage for ArrayStorage<T, N> {
    type Item = T;

    /// The capacity is fixed by `N`; the request is ignored.
    #[inline]
    fn initialize(&mut self, _requested: usize) {}

    #[inline]
    fn capacity(&self) -> usize {
        N
    }

    #[inline]
    fn slots(&self) -> &[T] {
        &self.slots
    }

    #[inline]
    fn slots_mut(&mut self) -> &mut [T] {
        &mut self.slots
    }
}

/// Heap storage sized at construction.
///
/// Slots are materialized with `T::default()` when the ring initializes
/// the storage, so `capacity()` always equals the number of live slots.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VecStorage<T> {
    slots: Vec<T>,
}

#[cfg(feature = "alloc")]
impl<T> VecStorage<T> {
    /// Empty storage; the ring's requested capacity decides its size.
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Adopt an existing vector as the initial slot contents.
    pub fn from_vec(slots: Vec<T>) -> Self {
        Self { slots }
    }

    /// Give the slots back, in physical order.
    pub fn into_vec(self) -> Vec<T> {
        self.slots
    }
}

#[cfg(feature = "alloc")]
impl<T: Default> Storage for VecStorage<T> {
    type Item = T;

    fn initialize(&mut self, requested: usize) {
        if self.slots.len() < requested {
            self.slots.reserve_exact(requested - self.slots.len());
            self.slots.resize_with(requested, T::default);
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn slots(&self) -> &[T] {
        &self.slots
    }

    #[inline]
    fn slots_mut(&mut self) -> &mut [T] {
        &mut self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_storage_capacity_is_fixed() {
        let mut s = ArrayStorage::<u8, 8>::default();
        s.initialize(100);
        assert_eq!(s.capacity(), 8);
        assert_eq!(s.slots(), &[0u8; 8]);
    }

    #[test]
    fn test_array_storage_from_array() {
        let mut s = ArrayStorage::from_array([b' '; 4]);
        s.slots_mut()[2] = b'x';
        assert_eq!(s.slots(), b"  x ");
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_vec_storage_initialize_fills_defaults() {
        let mut s = VecStorage::<u32>::new();
        assert_eq!(s.capacity(), 0);
        s.initialize(5);
        assert_eq!(s.capacity(), 5);
        assert_eq!(s.slots(), &[0, 0, 0, 0, 0]);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_vec_storage_keeps_adopted_contents() {
        let mut s = VecStorage::from_vec(std::vec![7, 8, 9]);
        s.initialize(2);
        assert_eq!(s.capacity(), 3);
        s.initialize(4);
        assert_eq!(s.into_vec(), std::vec![7, 8, 9, 0]);
    }
}
