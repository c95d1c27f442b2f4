//! # Mmap — File-Backed Byte Slots
//!
//! [`MmapStorage`] maps a file into memory and hands its bytes to a ring as
//! physical slots. The file is sized once at creation and never resized;
//! the ring writes straight into the page cache.
//!
//! Only the slot bytes live in the file. `head` and `len` belong to the
//! ring value, so reopening a file yields the old bytes as dead slots.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use memmap2::MmapMut;

use gyre_core::Storage;

/// Byte storage backed by a memory-mapped file.
pub struct MmapStorage {
    /// The mutable memory map over the backing file.
    mmap: MmapMut,

    path: PathBuf,

    /// The backing file (kept open for the lifetime of the mapping).
    _file: File,
}

impl MmapStorage {
    /// Open (or create) `path` and map exactly `capacity` bytes of it.
    ///
    /// An existing file is truncated or extended to `capacity`; bytes that
    /// survive keep their old values.
    pub fn create(path: &Path, capacity: usize) -> io::Result<Self> {
        if capacity == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "mmap storage needs at least one slot",
            ));
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        file.set_len(capacity as u64)?;

        // SAFETY: We own the file exclusively. No other process should
        // map the same file concurrently. The mmap is valid for the
        // lifetime of `_file`.
        let mmap = unsafe { MmapMut::map_mut(&file)? };

        tracing::debug!(path = %path.display(), capacity, "mapped ring storage");

        Ok(Self {
            mmap,
            path: path.to_path_buf(),
            _file: file,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush the mapped slots to disk.
    pub fn flush(&self) -> io::Result<()> {
        tracing::debug!(path = %self.path.display(), "flushing ring storage");
        self.mmap.flush()
    }
}

impl Storage for MmapStorage {
    type Item = u8;

    /// The mapping is sized by [`MmapStorage::create`]; the request is ignored.
    fn initialize(&mut self, requested: usize) {
        if requested != self.mmap.len() {
            tracing::debug!(
                requested,
                mapped = self.mmap.len(),
                "ring capacity fixed by mapping size"
            );
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.mmap.len()
    }

    #[inline]
    fn slots(&self) -> &[u8] {
        &self.mmap
    }

    #[inline]
    fn slots_mut(&mut self) -> &mut [u8] {
        &mut self.mmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyre_core::{Overwrite, RingBuffer};
    use std::io::Write;

    #[test]
    fn test_create_sizes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ring.bin");
        let storage = MmapStorage::create(&path, 64).unwrap();
        assert_eq!(storage.capacity(), 64);
        assert_eq!(storage.path(), path);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 64);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = MmapStorage::create(&dir.path().join("empty.bin"), 0)
            .err()
            .unwrap();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_ring_over_mmap_persists_slots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ring.bin");

        let storage = MmapStorage::create(&path, 4).unwrap();
        let mut rb: RingBuffer<_, Overwrite> = RingBuffer::with_storage(storage, 4);
        rb.write_all(b"abcdef").unwrap();
        assert_eq!(rb, *b"cdef");
        rb.storage().flush().unwrap();
        drop(rb);

        // Slots are physical: "ef" wrapped over "ab".
        assert_eq!(std::fs::read(&path).unwrap(), b"efcd");

        let reopened = MmapStorage::create(&path, 4).unwrap();
        assert_eq!(reopened.slots(), b"efcd");
    }
}
