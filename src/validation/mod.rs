//! Structural validation of parsed documents

pub mod depth;

pub use depth::{tree_depth, value_depth, DepthError, DepthGuard};
