use super::types::{Chunk, ChunkId};
use std::num::NonZeroU64;

/// Returns the ordered chunk ids of a file of `total_size_mb`.
///
/// Yields `floor(total_size_mb / chunk_size_mb)` ids, `file_name-1` first.
/// A file smaller than one chunk has no chunks at all, which is a valid result.
pub fn partition(file_name: &str, total_size_mb: u64, chunk_size_mb: NonZeroU64) -> Vec<ChunkId> {
    let chunk_count = total_size_mb / chunk_size_mb.get();
    (1..=chunk_count)
        .map(|sequence| ChunkId::new(file_name, sequence))
        .collect()
}

/// Fabricates the bytes of every chunk of a file.
///
/// Chunk contents are synthetic (`data of chunk <id>`); reading real file
/// bytes from disk is not modelled.
pub fn placeholder_chunks(
    file_name: &str,
    total_size_mb: u64,
    chunk_size_mb: NonZeroU64,
) -> Vec<Chunk> {
    partition(file_name, total_size_mb, chunk_size_mb)
        .into_iter()
        .map(|id| {
            let data = format!("data of chunk {}", id).into_bytes();
            Chunk { id, data }
        })
        .collect()
}
