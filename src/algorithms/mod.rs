//! Graph algorithms over [`FlowGraph`](crate::graph::FlowGraph).
//!
//! Two submodules:
//!
//! - [`traversal`] - post-order / reverse-post-order walks and a seeded
//!   random walk towards a root.
//! - [`dominators`] - dominator-tree construction and the tree LCA query it
//!   builds on.
//!
//! The most common entry points are re-exported at this level.

pub mod dominators;
pub mod traversal;

pub use dominators::{
    build_dominator_tree, build_dominator_tree_with, lowest_common_ancestor, DominatorMethod,
};
pub use traversal::{post_order, random_walk_back, reverse_post_order};
