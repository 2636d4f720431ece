//! Tracker Module
//!
//! The coordinating service of the network. It holds membership and chunk
//! placement metadata, never chunk bytes.
//!
//! ## Core Concepts
//! - **Placement**: On `put`, every chunk of the file gets up to three distinct
//!   replica holders, least-loaded nodes first.
//! - **Lookup**: On `get`, the recorded holders of the file's chunks are returned.
//!   Matching is exact on the file name, never a prefix match.
//! - **Departure**: On `leave`, the node disappears from membership and from
//!   every replica list. Chunks left without holders are forgotten; nothing is
//!   re-replicated.
//! - **Atomicity**: One lock covers a whole Join or Leave, so placement
//!   decisions never observe each other half-done.
//!
//! ## Submodules
//! - **`placement`**: Chunk -> replica list table.
//! - **`selection`**: Least-loaded replica selection.
//! - **`service`**: `TrackerService`, the lock-guarded request orchestration.
//! - **`protocol`**: Endpoints and DTOs for Join/Leave/Stats.
//! - **`handlers`**: Axum handlers and router.

pub mod error;
pub mod handlers;
pub mod placement;
pub mod protocol;
pub mod selection;
pub mod service;
