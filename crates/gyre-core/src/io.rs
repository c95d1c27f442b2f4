//! `std::io` adapters for byte rings.
//!
//! Writing appends under the ring's policy: a [`NoOverwrite`] ring accepts
//! only what fits (so `write_all` fails with `WriteZero` once full), an
//! [`Overwrite`] ring accepts everything and keeps the newest bytes.
//! Reading consumes from the front, crossing the wrap point transparently.
//!
//! [`NoOverwrite`]: crate::NoOverwrite
//! [`Overwrite`]: crate::Overwrite

use std::io::{self, BufRead, Read, Write};

use crate::policy::OverwritePolicy;
use crate::ring::RingBuffer;
use crate::storage::Storage;

impl<S, P> Write for RingBuffer<S, P>
where
    S: Storage<Item = u8>,
    P: OverwritePolicy,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.push_back_iter(buf.iter().copied()))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S, P> Read for RingBuffer<S, P>
where
    S: Storage<Item = u8>,
    P: OverwritePolicy,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let (first, second) = self.as_slices();

        let n1 = first.len().min(buf.len());
        buf[..n1].copy_from_slice(&first[..n1]);

        let n2 = second.len().min(buf.len() - n1);
        buf[n1..n1 + n2].copy_from_slice(&second[..n2]);

        Ok(self.pop_front_n(n1 + n2))
    }
}

impl<S, P> BufRead for RingBuffer<S, P>
where
    S: Storage<Item = u8>,
    P: OverwritePolicy,
{
    /// The first span only; the wrapped remainder shows up after `consume`.
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.first_span())
    }

    fn consume(&mut self, amt: usize) {
        self.pop_front_n(amt);
    }
}

#[cfg(test)]
mod tests {
    use crate::policy::Overwrite;
    use crate::{HeapRing, StackRing};
    use std::io::{BufRead, ErrorKind, Read, Write};
    use std::string::String;
    use std::vec::Vec;

    #[test]
    fn test_write_then_read_round_trip() {
        let mut rb = HeapRing::<u8>::with_capacity(16);
        rb.write_all(b"hello").unwrap();

        let mut out = Vec::new();
        rb.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"hello");
        assert!(rb.is_empty());
    }

    #[test]
    fn test_no_overwrite_write_is_partial() {
        let mut rb = StackRing::<u8, 4>::new();
        assert_eq!(rb.write(b"abcdef").unwrap(), 4);
        assert_eq!(rb.write(b"g").unwrap(), 0);

        let err = rb.write_all(b"h").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WriteZero);
        assert_eq!(rb, *b"abcd");
    }

    #[test]
    fn test_overwrite_write_keeps_newest() {
        let mut rb = StackRing::<u8, 5, Overwrite>::new();
        write!(rb, "this string overflows the ring").unwrap();
        assert_eq!(rb, *b" ring");
    }

    #[test]
    fn test_read_crosses_wrap_point() {
        let mut rb = StackRing::<u8, 4>::new();
        rb.write_all(b"abcd").unwrap();
        let mut two = [0u8; 2];
        rb.read_exact(&mut two).unwrap();
        rb.write_all(b"ef").unwrap();
        assert!(!rb.is_contiguous());

        let mut small = [0u8; 3];
        assert_eq!(rb.read(&mut small).unwrap(), 3);
        assert_eq!(&small, b"cde");
        assert_eq!(rb, *b"f");
    }

    #[test]
    fn test_buf_read_lines_across_wrap() {
        let mut rb = StackRing::<u8, 8>::new();
        rb.write_all(b"xxxxx").unwrap();
        rb.pop_front_n(5);
        rb.write_all(b"ab\ncd\n").unwrap();

        assert_eq!(rb.fill_buf().unwrap(), b"ab\n");
        let mut line = String::new();
        rb.read_line(&mut line).unwrap();
        assert_eq!(line, "ab\n");
        line.clear();
        rb.read_line(&mut line).unwrap();
        assert_eq!(line, "cd\n");
        assert!(rb.is_empty());
    }
}
