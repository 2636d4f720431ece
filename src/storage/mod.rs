//! Chunk Storage Module
//!
//! The node-local chunk store and the peer-facing API that serves it.
//!
//! ## Core Concepts
//! - **Store**: `ChunkStore` maps chunk ids to raw bytes in memory. Each node
//!   owns exactly one; nothing is shared or synchronized across nodes.
//! - **Writes**: `StoreChunk` inserts or overwrites unconditionally.
//! - **Reads**: `RequestChunk` returns the bytes or a NotFound answer. A miss is
//!   a normal outcome, reported with HTTP 404, never as a transport error.

pub mod handlers;
pub mod memory;
pub mod protocol;

#[cfg(test)]
mod tests;
