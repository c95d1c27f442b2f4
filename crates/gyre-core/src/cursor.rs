//! # Cursor — Logical Positions and Iteration
//!
//! A [`Position`] is a signed logical offset, counted from physical slot 0
//! of the ring at the moment it was taken (`begin()` is `head`, `end()` is
//! `head + len`). It does not borrow the ring. Dereferencing goes through
//! the ring's *current* modulus, so a position taken before a mutation is
//! reinterpreted, not invalidated.
//!
//! A [`Cursor`] pairs a position with a shared borrow of the ring for
//! random-access reads. [`Iter`] and [`IterMut`] walk the logical sequence
//! by chaining the ring's two contiguous spans.

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::slice;

use crate::policy::OverwritePolicy;
use crate::ring::RingBuffer;
use crate::storage::Storage;

/// Logical offset into a ring.
///
/// Equality and ordering look at the offset only, never at the ring state.
/// Arithmetic saturates at `isize::MIN`/`isize::MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(isize);

impl Position {
    #[inline]
    pub const fn new(offset: isize) -> Self {
        Self(offset)
    }

    /// Raw logical offset.
    #[inline]
    pub const fn offset(self) -> isize {
        self.0
    }

    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    #[inline]
    pub const fn prev(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// Physical slot this position maps to in a ring of `capacity` slots.
    #[inline]
    pub(crate) fn slot(self, capacity: usize) -> Option<usize> {
        if capacity == 0 {
            return None;
        }
        Some(self.0.rem_euclid(capacity as isize) as usize)
    }
}

impl Add<isize> for Position {
    type Output = Position;

    #[inline]
    fn add(self, n: isize) -> Position {
        Position(self.0.saturating_add(n))
    }
}

impl Sub<isize> for Position {
    type Output = Position;

    #[inline]
    fn sub(self, n: isize) -> Position {
        Position(self.0.saturating_sub(n))
    }
}

/// Signed distance between two positions.
impl Sub for Position {
    type Output = isize;

    #[inline]
    fn sub(self, other: Position) -> isize {
        self.0.saturating_sub(other.0)
    }
}

impl AddAssign<isize> for Position {
    #[inline]
    fn add_assign(&mut self, n: isize) {
        self.0 = self.0.saturating_add(n);
    }
}

impl SubAssign<isize> for Position {
    #[inline]
    fn sub_assign(&mut self, n: isize) {
        self.0 = self.0.saturating_sub(n);
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// Read-only random-access cursor over a ring.
pub struct Cursor<'a, S, P> {
    ring: &'a RingBuffer<S, P>,
    pos: Position,
}

impl<'a, S: Storage, P: OverwritePolicy> Cursor<'a, S, P> {
    pub(crate) fn new(ring: &'a RingBuffer<S, P>, pos: Position) -> Self {
        Self { ring, pos }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Element under the cursor, mapped through the ring's modulus.
    ///
    /// Only `None` for a zero-capacity ring; use
    /// [`is_valid`](Self::is_valid) to check the slot holds live data.
    #[inline]
    pub fn get(&self) -> Option<&'a S::Item> {
        self.ring.resolve(self.pos)
    }

    /// Whether the cursor lies within `[begin(), end())` of the ring.
    pub fn is_valid(&self) -> bool {
        self.pos >= self.ring.begin() && self.pos < self.ring.end()
    }

    #[inline]
    pub fn move_next(&mut self) {
        self.pos = self.pos.next();
    }

    #[inline]
    pub fn move_prev(&mut self) {
        self.pos = self.pos.prev();
    }

    #[inline]
    pub fn advance(&mut self, n: isize) {
        self.pos += n;
    }

    /// A new cursor `n` positions away from this one.
    #[inline]
    pub fn offset_by(&self, n: isize) -> Self {
        Self::new(self.ring, self.pos + n)
    }

    /// Signed number of steps from `self` to `other`.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> isize {
        other.pos - self.pos
    }
}

impl<S, P> Clone for Cursor<'_, S, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, P> Copy for Cursor<'_, S, P> {}

impl<S, P> PartialEq for Cursor<'_, S, P> {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl<S, P> Eq for Cursor<'_, S, P> {}

impl<S, P> PartialOrd for Cursor<'_, S, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S, P> Ord for Cursor<'_, S, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pos.cmp(&other.pos)
    }
}

impl<S, P> fmt::Debug for Cursor<'_, S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("pos", &self.pos).finish()
    }
}

// =============================================================================
// Span iterators
// =============================================================================

/// Iterator over the logical sequence of a ring.
pub struct Iter<'a, T> {
    first: slice::Iter<'a, T>,
    second: slice::Iter<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(first: &'a [T], second: &'a [T]) -> Self {
        Self {
            first: first.iter(),
            second: second.iter(),
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.first.next().or_else(|| self.second.next())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        self.second.next_back().or_else(|| self.first.next_back())
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.first.len() + self.second.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Mutable iterator over the logical sequence of a ring.
pub struct IterMut<'a, T> {
    first: slice::IterMut<'a, T>,
    second: slice::IterMut<'a, T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(first: &'a mut [T], second: &'a mut [T]) -> Self {
        Self {
            first: first.iter_mut(),
            second: second.iter_mut(),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        match self.first.next() {
            Some(item) => Some(item),
            None => self.second.next(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        match self.second.next_back() {
            Some(item) => Some(item),
            None => self.first.next_back(),
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.first.len() + self.second.len()
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}
