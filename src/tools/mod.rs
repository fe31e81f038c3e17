//! Building blocks for the tree builder.
//! These are not exposed outside the crate.

pub mod node_store;
pub mod frontier;
