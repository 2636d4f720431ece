//! Chunk Naming & Partitioning Module
//!
//! A logical file is split into fixed-size chunks, each identified by
//! `<file_name>-<sequence>` with a 1-based sequence number.
//!
//! ## Core Concepts
//! - **ChunkId**: Deterministic name of one chunk. It is always reconstructible
//!   from the file name and index, so no separate file -> chunks index exists.
//! - **Partitioning**: `partition` maps a file size to its ordered chunk ids.
//!   Any remainder smaller than one chunk is discarded.
//! - **Placeholder data**: Nodes fabricate chunk bytes instead of reading disk.

pub mod partitioner;
pub mod types;

#[cfg(test)]
mod tests;
