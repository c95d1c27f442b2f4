//! # Stream — Moving Bytes Between Rings and `std::io`
//!
//! [`fill_from`] pulls from a reader without losing input: a no-overwrite
//! ring is only asked for as many bytes as it has free slots. [`drain_to`]
//! pushes both spans to a writer and frees them only once written.

use std::io::{self, Read, Write};

use gyre_core::{OverwritePolicy, PolicyKind, RingBuffer, Storage};

/// Size of the scratch buffer used by [`fill_from`].
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Read from `reader` into `ring` until EOF, or until a no-overwrite ring
/// is full. Returns the number of bytes appended.
pub fn fill_from<S, P, R>(ring: &mut RingBuffer<S, P>, reader: &mut R) -> io::Result<usize>
where
    S: Storage<Item = u8>,
    P: OverwritePolicy,
    R: Read + ?Sized,
{
    let mut chunk = [0u8; CHUNK_SIZE];
    let mut total = 0;

    loop {
        let want = match ring.policy() {
            PolicyKind::NoOverwrite => (ring.capacity() - ring.len()).min(CHUNK_SIZE),
            PolicyKind::Overwrite if ring.capacity() == 0 => 0,
            PolicyKind::Overwrite => CHUNK_SIZE,
        };
        if want == 0 {
            break;
        }

        let n = match reader.read(&mut chunk[..want]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        total += ring.push_back_iter(chunk[..n].iter().copied());
    }

    tracing::debug!(bytes = total, len = ring.len(), "filled ring from reader");
    Ok(total)
}

/// Write every byte in `ring` to `writer`, front first, and remove it.
///
/// On a write error the unwritten span stays in the ring.
pub fn drain_to<S, P, W>(ring: &mut RingBuffer<S, P>, writer: &mut W) -> io::Result<usize>
where
    S: Storage<Item = u8>,
    P: OverwritePolicy,
    W: Write + ?Sized,
{
    let mut total = 0;
    while !ring.is_empty() {
        let span = ring.first_span();
        writer.write_all(span)?;
        let n = span.len();
        total += ring.pop_front_n(n);
    }
    writer.flush()?;

    tracing::debug!(bytes = total, "drained ring to writer");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyre_core::{HeapRing, NoOverwrite, Overwrite, StackRing};
    use std::io::Cursor;

    #[test]
    fn test_fill_no_overwrite_stops_without_losing_input() {
        let mut rb = StackRing::<u8, 4, NoOverwrite>::new();
        let mut input = Cursor::new(b"abcdefgh".to_vec());

        assert_eq!(fill_from(&mut rb, &mut input).unwrap(), 4);
        assert_eq!(rb, *b"abcd");
        // The rest is still in the reader.
        assert_eq!(input.position(), 4);

        rb.pop_front_n(2);
        assert_eq!(fill_from(&mut rb, &mut input).unwrap(), 2);
        assert_eq!(rb, *b"cdef");
    }

    #[test]
    fn test_fill_overwrite_keeps_tail_of_stream() {
        let data: Vec<u8> = (0..=255u8).cycle().take(3 * CHUNK_SIZE + 17).collect();
        let mut rb = HeapRing::<u8, Overwrite>::with_capacity(100);
        let mut input = Cursor::new(data.clone());

        assert_eq!(fill_from(&mut rb, &mut input).unwrap(), data.len());
        assert_eq!(rb, data[data.len() - 100..]);
    }

    #[test]
    fn test_fill_zero_capacity_reads_nothing() {
        let mut rb = HeapRing::<u8, Overwrite>::with_capacity(0);
        let mut input = Cursor::new(b"abc".to_vec());
        assert_eq!(fill_from(&mut rb, &mut input).unwrap(), 0);
        assert_eq!(input.position(), 0);
    }

    #[test]
    fn test_drain_writes_both_spans_in_order() {
        let mut rb = StackRing::<u8, 4, Overwrite>::new();
        rb.push_back_iter(*b"abcdef");
        assert!(!rb.is_contiguous());

        let mut out = Vec::new();
        assert_eq!(drain_to(&mut rb, &mut out).unwrap(), 4);
        assert_eq!(out, b"cdef");
        assert!(rb.is_empty());
    }

    #[test]
    fn test_drain_keeps_data_on_write_error() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("broken pipe"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut rb = StackRing::<u8, 4>::new();
        rb.push_back_iter(*b"ab");
        assert!(drain_to(&mut rb, &mut Broken).is_err());
        assert_eq!(rb, *b"ab");
    }
}
