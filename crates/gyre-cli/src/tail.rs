//! # Tail — Keep the Last N Bytes of a Stream
//!
//! Streams input through an overwrite ring of `N` bytes, then writes what
//! survived. The ring lives on the heap, or in a memory-mapped file when a
//! backing path is given.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use gyre_core::{HeapRing, Overwrite, RingBuffer, Storage};
use gyre_io::MmapStorage;

/// Byte counts for one tail run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailStats {
    pub read: usize,
    pub kept: usize,
    pub crc32: u32,
}

pub fn run<R, W>(bytes: usize, backing: Option<&Path>, input: &mut R, output: &mut W) -> Result<TailStats>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let stats = match backing {
        Some(path) => {
            let storage = MmapStorage::create(path, bytes)
                .with_context(|| format!("failed to map backing file {}", path.display()))?;
            let mut rb: RingBuffer<MmapStorage, Overwrite> = RingBuffer::with_storage(storage, bytes);
            let stats = pump(&mut rb, input, output)?;
            rb.storage()
                .flush()
                .with_context(|| format!("failed to flush {}", path.display()))?;
            stats
        }
        None => {
            let mut rb = HeapRing::<u8, Overwrite>::with_capacity(bytes);
            pump(&mut rb, input, output)?
        }
    };

    tracing::info!(
        read = stats.read,
        kept = stats.kept,
        crc32 = format_args!("{:08x}", stats.crc32),
        "tail complete"
    );
    Ok(stats)
}

fn pump<S, R, W>(rb: &mut RingBuffer<S, Overwrite>, input: &mut R, output: &mut W) -> Result<TailStats>
where
    S: Storage<Item = u8>,
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let read = gyre_io::fill_from(rb, input).context("failed to read input")?;
    let crc32 = gyre_io::checksum(rb);
    let kept = gyre_io::drain_to(rb, output).context("failed to write output")?;
    Ok(TailStats { read, kept, crc32 })
}
