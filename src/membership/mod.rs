//! Membership Module
//!
//! Tracker-side registry of the nodes that have joined the network.
//!
//! ## Core Mechanisms
//! - **Admission**: A node is registered with load 0 on its first Join, whatever
//!   the action. Later Joins from the same id leave its entry untouched.
//! - **Load accounting**: Each chunk replica assigned to a node bumps its load.
//!   Replica selection reads these counters to prefer the least-loaded nodes.
//! - **Departure**: Leave drops the entry. Unknown ids are tolerated.

pub mod table;
pub mod types;
