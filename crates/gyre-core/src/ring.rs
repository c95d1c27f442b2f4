//! # Ring — The Circular Buffer Core
//!
//! [`RingBuffer`] owns a [`Storage`], a `head` slot and a logical `len`.
//! The live elements are the `len` slots starting at `head`, wrapping past
//! the last physical slot back to slot 0:
//!
//! ```text
//! valid = { (head + i) mod capacity : 0 <= i < len }
//! tail  = (head + len) mod capacity          (next write slot)
//! ```
//!
//! Appends write at `tail` and then let the [`OverwritePolicy`] move
//! `head`/`len`. Removals only advance `head`; slot contents are left in
//! place until overwritten.

use core::fmt;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};

use crate::cursor::{Cursor, Iter, IterMut, Position};
use crate::dump::Dump;
use crate::error::{Result, RingError};
use crate::policy::{NoOverwrite, OverwritePolicy, PolicyKind};
use crate::storage::{ArrayStorage, Storage};

#[cfg(feature = "alloc")]
use crate::storage::VecStorage;

/// Circular buffer over storage `S` with overwrite policy `P`.
///
/// # Invariant
///
/// `len <= capacity` and `head < capacity` (both are zero for a
/// zero-capacity ring). Every physical index is reduced modulo
/// `storage.capacity()`.
pub struct RingBuffer<S, P = NoOverwrite> {
    storage: S,

    /// Physical slot of the logically first element.
    head: usize,

    /// Number of live elements.
    len: usize,

    _policy: PhantomData<P>,
}

impl<S: Storage, P: OverwritePolicy> RingBuffer<S, P> {
    /// Build a ring over `storage`, asking it to prepare `requested` slots.
    pub fn with_storage(mut storage: S, requested: usize) -> Self {
        storage.initialize(requested);
        Self {
            storage,
            head: 0,
            len: 0,
            _policy: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Physical slot of the first element.
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Physical slot the next append writes to.
    #[inline]
    pub fn tail(&self) -> usize {
        self.wrap(self.head + self.len)
    }

    /// The overwrite policy this ring was built with.
    #[inline]
    pub fn policy(&self) -> PolicyKind {
        P::KIND
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Raw physical slots, live or not.
    #[inline]
    pub fn slots(&self) -> &[S::Item] {
        self.storage.slots()
    }

    /// Raw physical slots, live or not.
    #[inline]
    pub fn slots_mut(&mut self) -> &mut [S::Item] {
        self.storage.slots_mut()
    }

    // =========================================================================
    // Element access
    // =========================================================================

    pub fn front(&self) -> Result<&S::Item> {
        if self.is_empty() {
            return Err(RingError::Empty);
        }
        Ok(&self.slots()[self.head])
    }

    pub fn front_mut(&mut self) -> Result<&mut S::Item> {
        if self.is_empty() {
            return Err(RingError::Empty);
        }
        let head = self.head;
        Ok(&mut self.slots_mut()[head])
    }

    pub fn back(&self) -> Result<&S::Item> {
        if self.is_empty() {
            return Err(RingError::Empty);
        }
        Ok(&self.slots()[self.wrap(self.head + self.len - 1)])
    }

    pub fn back_mut(&mut self) -> Result<&mut S::Item> {
        if self.is_empty() {
            return Err(RingError::Empty);
        }
        let slot = self.wrap(self.head + self.len - 1);
        Ok(&mut self.slots_mut()[slot])
    }

    /// The `i`-th element counted from the front.
    pub fn at(&self, i: usize) -> Result<&S::Item> {
        let slot = self.logical_slot(i)?;
        Ok(&self.slots()[slot])
    }

    pub fn at_mut(&mut self, i: usize) -> Result<&mut S::Item> {
        let slot = self.logical_slot(i)?;
        Ok(&mut self.slots_mut()[slot])
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<&S::Item> {
        self.at(i).ok()
    }

    #[inline]
    pub fn get_mut(&mut self, i: usize) -> Option<&mut S::Item> {
        self.at_mut(i).ok()
    }

    /// Dereference a position through the modulus.
    ///
    /// No liveness check is made: a position outside `[begin(), end())`
    /// still lands on some physical slot. `None` only for zero capacity.
    pub fn resolve(&self, pos: Position) -> Option<&S::Item> {
        let slot = pos.slot(self.capacity())?;
        Some(&self.slots()[slot])
    }

    pub fn resolve_mut(&mut self, pos: Position) -> Option<&mut S::Item> {
        let slot = pos.slot(self.capacity())?;
        Some(&mut self.slots_mut()[slot])
    }

    // =========================================================================
    // Positions
    // =========================================================================

    #[inline]
    pub fn begin(&self) -> Position {
        self.offset(0)
    }

    #[inline]
    pub fn end(&self) -> Position {
        self.offset(self.len)
    }

    /// Position of the `i`-th element counted from the front.
    ///
    /// Saturates at `isize::MAX` for indices past the addressable range.
    #[inline]
    pub fn offset(&self, i: usize) -> Position {
        let offset = self.head.saturating_add(i);
        Position::new(isize::try_from(offset).unwrap_or(isize::MAX))
    }

    pub fn cursor(&self, pos: Position) -> Cursor<'_, S, P> {
        Cursor::new(self, pos)
    }

    pub fn cursor_front(&self) -> Cursor<'_, S, P> {
        Cursor::new(self, self.begin())
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Append one element at the tail.
    ///
    /// Returns 1 when stored, 0 when the policy rejected it. A rejected
    /// append leaves the ring untouched.
    pub fn push_back(&mut self, value: S::Item) -> usize {
        let capacity = self.capacity();
        if !P::can_append(capacity, self.len) {
            return 0;
        }
        let tail = (self.head + self.len) % capacity;
        self.slots_mut()[tail] = value;
        P::advance_on_append(capacity, &mut self.head, &mut self.len);
        1
    }

    /// Append elements one by one, stopping at the first rejection.
    ///
    /// Returns how many were stored; the rest of `values` is dropped.
    pub fn push_back_iter<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = S::Item>,
    {
        let mut appended = 0;
        for value in values {
            if self.push_back(value) == 0 {
                break;
            }
            appended += 1;
        }
        appended
    }

    /// Remove the front element. Returns 1 if one was removed.
    pub fn pop_front(&mut self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.head = self.wrap(self.head + 1);
        self.len -= 1;
        1
    }

    /// Remove up to `n` elements from the front. Returns the count removed.
    pub fn pop_front_n(&mut self, n: usize) -> usize {
        let n = n.min(self.len);
        if n > 0 {
            self.head = self.wrap(self.head + n);
            self.len -= n;
        }
        n
    }

    /// Remove every element before `pos`.
    ///
    /// The distance from the current `begin()` is clamped to `[0, len]`;
    /// positions at or before the front remove nothing.
    pub fn pop_front_to(&mut self, pos: Position) -> usize {
        let diff = pos.offset().saturating_sub(self.begin().offset());
        if diff <= 0 {
            return 0;
        }
        self.pop_front_n(diff.unsigned_abs())
    }

    /// Drop every element in O(1). The next append lands at the old tail.
    pub fn clear(&mut self) {
        self.head = self.tail();
        self.len = 0;
    }

    // =========================================================================
    // Contiguity
    // =========================================================================

    /// Whether the live elements occupy one unbroken physical run.
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.len == 0 || self.head + self.len <= self.capacity()
    }

    #[inline]
    fn first_len(&self) -> usize {
        self.len.min(self.capacity() - self.head)
    }

    /// Live elements from `head` up to the end of storage (or the tail).
    pub fn first_span(&self) -> &[S::Item] {
        let first = self.first_len();
        &self.slots()[self.head..self.head + first]
    }

    /// Live elements that wrapped to the start of storage. Empty when
    /// [`is_contiguous`](Self::is_contiguous).
    pub fn second_span(&self) -> &[S::Item] {
        let second = self.len - self.first_len();
        &self.slots()[..second]
    }

    /// Both spans, in logical order.
    pub fn as_slices(&self) -> (&[S::Item], &[S::Item]) {
        (self.first_span(), self.second_span())
    }

    pub fn as_mut_slices(&mut self) -> (&mut [S::Item], &mut [S::Item]) {
        let head = self.head;
        let first = self.first_len();
        let second = self.len - first;
        let (wrapped, tail_side) = self.slots_mut().split_at_mut(head);
        (&mut tail_side[..first], &mut wrapped[..second])
    }

    /// `begin()` and the position one past the first span.
    pub fn first_span_bounds(&self) -> (Position, Position) {
        let begin = self.begin();
        (begin, begin + self.first_len() as isize)
    }

    // =========================================================================
    // Iteration & diagnostics
    // =========================================================================

    pub fn iter(&self) -> Iter<'_, S::Item> {
        let (first, second) = self.as_slices();
        Iter::new(first, second)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, S::Item> {
        let (first, second) = self.as_mut_slices();
        IterMut::new(first, second)
    }

    /// Slot-by-slot picture of the storage with head/tail markers.
    pub fn dump(&self) -> Dump<'_, S, P> {
        Dump::new(self)
    }

    /// Compare raw state: every physical slot, `head` and `len`.
    ///
    /// Stricter than `==`, which compares logical contents only.
    pub fn same_layout<S2, P2>(&self, other: &RingBuffer<S2, P2>) -> bool
    where
        S2: Storage,
        P2: OverwritePolicy,
        S::Item: PartialEq<S2::Item>,
    {
        self.head == other.head && self.len == other.len && self.slots() == other.slots()
    }

    /// Whether physical slot `i` currently holds a live element.
    pub(crate) fn is_slot_live(&self, i: usize) -> bool {
        let capacity = self.capacity();
        capacity > 0 && (i + capacity - self.head) % capacity < self.len
    }

    // =========================================================================
    // Internals
    // =========================================================================

    #[inline]
    fn wrap(&self, i: usize) -> usize {
        match self.capacity() {
            0 => 0,
            capacity => i % capacity,
        }
    }

    #[inline]
    fn logical_slot(&self, i: usize) -> Result<usize> {
        if i >= self.len {
            return Err(RingError::IndexOutOfRange {
                index: i,
                len: self.len,
            });
        }
        Ok(self.wrap(self.head + i))
    }
}

// =============================================================================
// Constructors for the bundled storages
// =============================================================================

impl<T: Default, const N: usize, P: OverwritePolicy> RingBuffer<ArrayStorage<T, N>, P> {
    /// A ring with `N` inline slots.
    pub fn new() -> Self {
        Self::with_storage(ArrayStorage::default(), N)
    }
}

impl<T: Default, const N: usize, P: OverwritePolicy> Default for RingBuffer<ArrayStorage<T, N>, P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "alloc")]
impl<T: Default, P: OverwritePolicy> RingBuffer<VecStorage<T>, P> {
    /// A ring with `capacity` heap slots, allocated once.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_storage(VecStorage::new(), capacity)
    }
}

// =============================================================================
// Trait impls
// =============================================================================

impl<S: Clone, P> Clone for RingBuffer<S, P> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            head: self.head,
            len: self.len,
            _policy: PhantomData,
        }
    }
}

impl<S, P> fmt::Debug for RingBuffer<S, P>
where
    S: Storage,
    S::Item: fmt::Debug,
    P: OverwritePolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Logical equality: same elements in the same order.
impl<S, P, S2, P2> PartialEq<RingBuffer<S2, P2>> for RingBuffer<S, P>
where
    S: Storage,
    S2: Storage,
    P: OverwritePolicy,
    P2: OverwritePolicy,
    S::Item: PartialEq<S2::Item>,
{
    fn eq(&self, other: &RingBuffer<S2, P2>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<S, P> Eq for RingBuffer<S, P>
where
    S: Storage,
    S::Item: Eq,
    P: OverwritePolicy,
{
}

impl<S, P, U> PartialEq<[U]> for RingBuffer<S, P>
where
    S: Storage,
    S::Item: PartialEq<U>,
    P: OverwritePolicy,
{
    fn eq(&self, other: &[U]) -> bool {
        self.len == other.len() && self.iter().eq(other.iter())
    }
}

impl<S, P, U> PartialEq<&[U]> for RingBuffer<S, P>
where
    S: Storage,
    S::Item: PartialEq<U>,
    P: OverwritePolicy,
{
    fn eq(&self, other: &&[U]) -> bool {
        *self == **other
    }
}

impl<S, P, U, const M: usize> PartialEq<[U; M]> for RingBuffer<S, P>
where
    S: Storage,
    S::Item: PartialEq<U>,
    P: OverwritePolicy,
{
    fn eq(&self, other: &[U; M]) -> bool {
        *self == other[..]
    }
}

impl<S: Storage, P: OverwritePolicy> Index<usize> for RingBuffer<S, P> {
    type Output = S::Item;

    fn index(&self, i: usize) -> &S::Item {
        match self.at(i) {
            Ok(item) => item,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<S: Storage, P: OverwritePolicy> IndexMut<usize> for RingBuffer<S, P> {
    fn index_mut(&mut self, i: usize) -> &mut S::Item {
        match self.at_mut(i) {
            Ok(item) => item,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<S: Storage, P: OverwritePolicy> Extend<S::Item> for RingBuffer<S, P> {
    fn extend<I: IntoIterator<Item = S::Item>>(&mut self, iter: I) {
        self.push_back_iter(iter);
    }
}

// Borrowed-element `Extend` is spelled out per storage: a blanket
// `Extend<&S::Item>` would overlap the impl above during coherence.

impl<'a, T, const N: usize, P> Extend<&'a T> for RingBuffer<ArrayStorage<T, N>, P>
where
    T: Copy + 'a,
    P: OverwritePolicy,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.push_back_iter(iter.into_iter().copied());
    }
}

#[cfg(feature = "alloc")]
impl<'a, T, P> Extend<&'a T> for RingBuffer<VecStorage<T>, P>
where
    T: Copy + Default + 'a,
    P: OverwritePolicy,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.push_back_iter(iter.into_iter().copied());
    }
}

impl<'a, S: Storage, P: OverwritePolicy> IntoIterator for &'a RingBuffer<S, P> {
    type Item = &'a S::Item;
    type IntoIter = Iter<'a, S::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, S: Storage, P: OverwritePolicy> IntoIterator for &'a mut RingBuffer<S, P> {
    type Item = &'a mut S::Item;
    type IntoIter = IterMut<'a, S::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// =============================================================================
// Kani Proofs: Index Invariants
// =============================================================================

#[cfg(kani)]
mod proofs {
    use super::*;
    use crate::policy::Overwrite;

    /// **Proof: head and len stay in bounds under the overwrite policy**
    #[kani::proof]
    #[kani::unwind(7)]
    fn verify_overwrite_indices_in_bounds() {
        let mut rb = RingBuffer::<ArrayStorage<u8, 4>, Overwrite>::new();

        let ops: usize = kani::any();
        kani::assume(ops <= 6);

        for _ in 0..ops {
            if kani::any() {
                let _ = rb.push_back(kani::any());
            } else {
                let _ = rb.pop_front();
            }
        }

        assert!(rb.len() <= rb.capacity());
        assert!(rb.head() < rb.capacity());
        assert!(rb.first_span().len() + rb.second_span().len() == rb.len());
    }

    /// **Proof: a rejected append changes nothing**
    #[kani::proof]
    #[kani::unwind(6)]
    fn verify_no_overwrite_rejection_is_inert() {
        let mut rb = RingBuffer::<ArrayStorage<u8, 4>, NoOverwrite>::new();

        let pops: usize = kani::any();
        kani::assume(pops <= 4);
        for _ in 0..4 {
            let _ = rb.push_back(kani::any());
        }
        for _ in 0..pops {
            let _ = rb.pop_front();
        }
        for _ in 0..pops {
            let _ = rb.push_back(kani::any());
        }

        let before = rb.clone();
        assert!(rb.push_back(kani::any()) == 0);
        assert!(rb.same_layout(&before));
    }
}
