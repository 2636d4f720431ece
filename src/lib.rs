//! Chunk Tracker Network Library
//!
//! This library crate defines the modules shared by the two process roles of
//! the binary (`main.rs`): the central tracker and the storage nodes.
//!
//! ## Architecture Modules
//!
//! - **`chunk`**: Chunk naming (`<file>-<seq>`) and the partitioning of a file into chunk ids.
//! - **`membership`**: The tracker's table of admitted nodes and their load counters.
//! - **`tracker`**: Replica selection, the placement table and the Join/Leave service
//!   behind a single lock, exposed over HTTP.
//! - **`storage`**: A node's in-memory chunk store and its HTTP surface.
//! - **`node`**: Node-side clients, concurrent chunk push/pull and the interactive session.
//! - **`config`**: Command-line and environment configuration.

pub mod chunk;
pub mod config;
pub mod membership;
pub mod node;
pub mod storage;
pub mod tracker;
