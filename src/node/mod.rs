//! Node Module
//!
//! The peer side of the network: talking to the tracker, moving chunk bytes
//! between peers and the interactive session that drives both.
//!
//! ## Workflow
//! 1. **Put**: Join the tracker with `put`, receive the chunk -> holders map, then
//!    push each chunk's bytes to every assigned holder.
//! 2. **Get**: Join the tracker with `get`, receive the chunk -> holders map, then
//!    pull each chunk from the first listed holder.
//! 3. **Leave**: Tell the tracker this node is gone.
//!
//! Every chunk transfer is an independent task; one failed push or pull never
//! blocks the others and nothing is retried.
//!
//! ## Submodules
//! - **`client`**: HTTP clients for the tracker and for peer chunk stores.
//! - **`transfer`**: Concurrent push/pull of chunk bytes.
//! - **`command`**: Parsing of the interactive command line.
//! - **`session`**: The interactive loop of a running node.

pub mod client;
pub mod command;
pub mod session;
pub mod transfer;
