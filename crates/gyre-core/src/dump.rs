//! # Dump — Diagnostic Picture of a Ring
//!
//! Renders every physical slot and where `head`/`tail` sit:
//!
//! ```text
//!    a - b -(.)-(.)
//!   |<---->|
//! ```
//!
//! Live slots print as ` v `, dead ones as `(v)`. The marker row uses four
//! columns per slot: `  |<` head, `>|  ` tail, ` >|<` both, `----` live.

use core::fmt;

use crate::policy::OverwritePolicy;
use crate::ring::RingBuffer;
use crate::storage::Storage;

/// `Display` adapter returned by [`RingBuffer::dump`].
pub struct Dump<'a, S, P> {
    ring: &'a RingBuffer<S, P>,
}

impl<'a, S, P> Dump<'a, S, P> {
    pub(crate) fn new(ring: &'a RingBuffer<S, P>) -> Self {
        Self { ring }
    }
}

impl<S, P> fmt::Display for Dump<'_, S, P>
where
    S: Storage,
    S::Item: fmt::Display,
    P: OverwritePolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ring = self.ring;
        let capacity = ring.capacity();
        let head = ring.head();
        let tail = ring.tail();

        f.write_str("  ")?;
        for (i, item) in ring.slots().iter().enumerate() {
            if ring.is_slot_live(i) {
                write!(f, " {} ", item)?;
            } else {
                write!(f, "({})", item)?;
            }
            if i + 1 < capacity {
                f.write_str("-")?;
            }
        }
        f.write_str("\n")?;

        for i in 0..capacity {
            let marker = if i == head && i == tail {
                " >|<"
            } else if i == head {
                "  |<"
            } else if i == tail {
                ">|  "
            } else if ring.is_slot_live(i) {
                "----"
            } else {
                "    "
            };
            f.write_str(marker)?;
        }
        f.write_str("\n")
    }
}

#[cfg(test)]
mod tests {
    use crate::policy::Overwrite;
    use crate::storage::ArrayStorage;
    use crate::RingBuffer;
    use std::string::ToString;

    #[test]
    fn test_dump_marks_head_and_tail() {
        let mut rb: RingBuffer<_> = RingBuffer::with_storage(ArrayStorage::from_array(['.'; 4]), 4);
        rb.push_back_iter("ab".chars());
        assert_eq!(
            rb.dump().to_string(),
            "   a - b -(.)-(.)\n  |<---->|      \n"
        );
    }

    #[test]
    fn test_dump_wrapped_ring() {
        let mut rb: RingBuffer<_, Overwrite> =
            RingBuffer::with_storage(ArrayStorage::from_array(['.'; 3]), 3);
        rb.push_back_iter("wxyz".chars());
        // full: head == tail == 1
        assert_eq!(rb.dump().to_string(), "   z - x - y \n---- >|<----\n");

        rb.pop_front();
        assert_eq!(rb.dump().to_string(), "   z -(x)- y \n---->|    |<\n");
    }

    #[test]
    fn test_dump_empty_storage() {
        let rb = RingBuffer::<ArrayStorage<u8, 0>>::new();
        assert_eq!(rb.dump().to_string(), "  \n\n");
    }
}
