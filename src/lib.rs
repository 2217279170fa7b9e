// Copyright 2026 flowdom contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![deny(missing_docs)]

//! # flowdom
//!
//! Dominator and post-dominator tree construction for directed control-flow
//! graphs (CFGs). Dominator trees are a foundational data structure for
//! optimizing compilers and static analyzers: redundancy elimination, loop
//! detection, and SSA construction all build on them.
//!
//! The crate provides three layers:
//!
//! - [`graph`] - an arena-based directed graph ([`FlowGraph`]) with labeled
//!   nodes, designated START/END endpoints, and graph-owned edge insertion
//!   that keeps successor and predecessor lists consistent.
//! - [`algorithms::traversal`](algorithms) - iterative post-order and
//!   reverse-post-order traversal, plus a seeded random walk towards a root
//!   for diagnostics.
//! - [`algorithms::dominators`](algorithms) - dominator-tree construction.
//!   The primary builder walks nodes in reverse post-order and accumulates
//!   immediate dominators through tree LCA queries; a fixpoint variant is
//!   available for irreducible inputs.
//!
//! Construction of the CFG itself (from source code or bytecode), rendering
//! beyond the debug [`Display`](std::fmt::Display) dump, persistence, and
//! general-purpose graph algorithms are out of scope.
//!
//! ## Quick Start
//!
//! ```rust
//! use flowdom::prelude::*;
//!
//! // START -> branch -> {then, join}, then -> join, join -> END
//! let mut cfg: FlowGraph<()> = FlowGraph::with_endpoints();
//! let start = cfg.start().unwrap();
//! let end = cfg.end().unwrap();
//!
//! let branch = cfg.add_node("branch")?;
//! let then = cfg.add_node("then")?;
//! let join = cfg.add_node("join")?;
//!
//! cfg.add_edge(start, branch)?;
//! cfg.add_edges(branch, &[then, join])?;
//! cfg.add_edge(then, join)?;
//! cfg.add_edge(join, end)?;
//!
//! let tree = build_dominator_tree(&cfg)?;
//!
//! // `branch` is the immediate dominator of `join`: the path through `then`
//! // is optional, but every path from START to `join` passes `branch`.
//! let branch_t = tree.node_by_label("branch")?;
//! let join_t = tree.node_by_label("join")?;
//! assert!(tree.node(branch_t).unwrap().successors().contains(&join_t));
//! # Ok::<(), flowdom::Error>(())
//! ```
//!
//! ## Post-dominators
//!
//! The builder is edge-direction agnostic: reversing every edge of a CFG
//! with [`FlowGraph::reverse_edges`] and re-running the same builder yields
//! the post-dominator tree (dominance over paths to END instead of from
//! START).
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result). The two
//! error kinds mirror how failures arise:
//!
//! - [`Error::InvalidArgument`] - the caller supplied a malformed or missing
//!   structure (empty graph, absent START/END, label collision). Detected
//!   before computation begins.
//! - [`Error::InvalidState`] - an internal consistency check failed
//!   mid-algorithm (disconnected input, a tree-assumption violation during
//!   LCA, an unresolvable immediate dominator on irreducible input). These
//!   signal that the input violates an assumption of the single-pass
//!   algorithm; callers can fall back to
//!   [`DominatorMethod::Fixpoint`](algorithms::DominatorMethod).
//!
//! ## Concurrency
//!
//! The model is single-threaded and synchronous: a [`FlowGraph`] is mutated
//! through exclusive access and the algorithms are pure functions of their
//! input graph. The only non-determinism is the caller-supplied random
//! source of [`algorithms::random_walk_back`].

#[macro_use]
pub(crate) mod error;

/// Directed flow-graph container and node types.
pub mod graph;

/// Traversal orders and dominator-tree construction.
pub mod algorithms;

/// Convenient re-exports of the most commonly used types and functions.
///
/// # Example
///
/// ```rust
/// use flowdom::prelude::*;
///
/// let graph: FlowGraph<()> = FlowGraph::with_endpoints();
/// let tree = build_dominator_tree(&graph)?;
/// assert_eq!(tree.node_count(), graph.node_count());
/// # Ok::<(), flowdom::Error>(())
/// ```
pub mod prelude {
    pub use crate::algorithms::{
        build_dominator_tree, build_dominator_tree_with, lowest_common_ancestor, post_order,
        random_walk_back, reverse_post_order, DominatorMethod,
    };
    pub use crate::graph::{FlowGraph, NodeId, END, START};
    pub use crate::{Error, Result};
}

pub use error::Error;
pub use graph::{FlowGraph, NodeId};

/// Crate-wide result type carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
