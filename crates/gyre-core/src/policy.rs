//! # Overwrite Policies
//!
//! What an append does when the ring is already full. Policies are
//! zero-sized marker types; the ring calls their associated functions
//! directly, so the choice is resolved at compile time.

use core::fmt;
use core::str::FromStr;

/// Append behaviour of a ring at capacity.
pub trait OverwritePolicy {
    /// Runtime name of this policy.
    const KIND: PolicyKind;

    /// Whether an append may proceed given the current occupancy.
    fn can_append(capacity: usize, len: usize) -> bool;

    /// Update `head`/`len` after a value was written at the tail slot.
    ///
    /// Only called when [`can_append`](Self::can_append) returned `true`,
    /// which implies `capacity > 0`.
    fn advance_on_append(capacity: usize, head: &mut usize, len: &mut usize);
}

/// Reject appends once the ring is full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NoOverwrite;

impl OverwritePolicy for NoOverwrite {
    const KIND: PolicyKind = PolicyKind::NoOverwrite;

    #[inline]
    fn can_append(capacity: usize, len: usize) -> bool {
        len < capacity
    }

    #[inline]
    fn advance_on_append(_capacity: usize, _head: &mut usize, len: &mut usize) {
        *len += 1;
    }
}

/// Evict the oldest element to make room when the ring is full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Overwrite;

impl OverwritePolicy for Overwrite {
    const KIND: PolicyKind = PolicyKind::Overwrite;

    #[inline]
    fn can_append(capacity: usize, _len: usize) -> bool {
        // A zero-slot ring has nowhere to write, even when overwriting.
        capacity > 0
    }

    #[inline]
    fn advance_on_append(capacity: usize, head: &mut usize, len: &mut usize) {
        if *len == capacity {
            *head = (*head + 1) % capacity;
        } else {
            *len += 1;
        }
    }
}

/// Runtime identifier for an [`OverwritePolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum PolicyKind {
    #[default]
    NoOverwrite,
    Overwrite,
}

impl PolicyKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            PolicyKind::NoOverwrite => "no-overwrite",
            PolicyKind::Overwrite => "overwrite",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized policy name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown overwrite policy (expected `no-overwrite` or `overwrite`)")]
pub struct ParsePolicyError;

impl FromStr for PolicyKind {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no-overwrite" | "no_overwrite" => Ok(PolicyKind::NoOverwrite),
            "overwrite" => Ok(PolicyKind::Overwrite),
            _ => Err(ParsePolicyError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overwrite_rejects_when_full() {
        assert!(NoOverwrite::can_append(4, 3));
        assert!(!NoOverwrite::can_append(4, 4));
        assert!(!NoOverwrite::can_append(0, 0));
    }

    #[test]
    fn test_no_overwrite_never_moves_head() {
        let (mut head, mut len) = (2, 1);
        NoOverwrite::advance_on_append(4, &mut head, &mut len);
        assert_eq!((head, len), (2, 2));
    }

    #[test]
    fn test_overwrite_evicts_oldest_when_full() {
        let (mut head, mut len) = (3, 4);
        assert!(Overwrite::can_append(4, 4));
        Overwrite::advance_on_append(4, &mut head, &mut len);
        assert_eq!((head, len), (0, 4));
    }

    #[test]
    fn test_overwrite_grows_until_full() {
        let (mut head, mut len) = (1, 2);
        Overwrite::advance_on_append(4, &mut head, &mut len);
        assert_eq!((head, len), (1, 3));
    }

    #[test]
    fn test_overwrite_refuses_zero_capacity() {
        assert!(!Overwrite::can_append(0, 0));
    }

    #[test]
    fn test_policy_kind_parse_and_display() {
        assert_eq!("overwrite".parse::<PolicyKind>(), Ok(PolicyKind::Overwrite));
        assert_eq!("no-overwrite".parse::<PolicyKind>(), Ok(PolicyKind::NoOverwrite));
        assert_eq!("no_overwrite".parse::<PolicyKind>(), Ok(PolicyKind::NoOverwrite));
        assert_eq!("drop".parse::<PolicyKind>(), Err(ParsePolicyError));
        assert_eq!(PolicyKind::Overwrite.as_str(), "overwrite");
        assert_eq!(NoOverwrite::KIND, PolicyKind::NoOverwrite);
    }
}
