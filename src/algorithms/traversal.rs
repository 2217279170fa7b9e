//! Traversal orders for flow graphs.
//!
//! This module provides the iterative post-order and reverse-post-order
//! traversals the dominator builders depend on, plus a seeded random walk
//! towards a root for diagnostics.
//!
//! # Ordering guarantees
//!
//! [`post_order`] guarantees that every reachable node appears exactly once
//! and that (back edges aside) a node appears before all nodes it is
//! reachable from. The relative order of sibling branches is an artifact of
//! the frontier scan and not part of the contract: callers should rely on
//! set membership and topological correctness only. The traversal is still
//! fully deterministic for a given graph, which the dominator builders and
//! the tests depend on.

use rand::Rng;

use crate::graph::{FlowGraph, NodeId};

/// Computes the post-order traversal of nodes reachable from `root`.
///
/// The traversal is iterative: an explicit frontier stack plus a visited
/// set. At each step the scan over the top node's successors descends into
/// the last unvisited successor; once no unvisited successor remains, the
/// node is popped and appended to the result. Each reachable node is
/// produced exactly once.
///
/// Returns an empty sequence when `root` is out of range for the graph or
/// has no successors.
///
/// # Complexity
///
/// O(V·S) where S is the maximum successor-list length (the frontier scan
/// revisits the top node's successor list once per descent).
///
/// # Examples
///
/// ```rust
/// use flowdom::graph::FlowGraph;
/// use flowdom::algorithms::post_order;
///
/// let mut graph: FlowGraph<()> = FlowGraph::new();
/// let a = graph.add_node("a")?;
/// let b = graph.add_node("b")?;
/// let c = graph.add_node("c")?;
/// graph.add_edge(a, b)?;
/// graph.add_edge(b, c)?;
///
/// // Children before parents: c, b, a.
/// assert_eq!(post_order(&graph, a), vec![c, b, a]);
/// # Ok::<(), flowdom::Error>(())
/// ```
#[must_use]
pub fn post_order<T>(graph: &FlowGraph<T>, root: NodeId) -> Vec<NodeId> {
    let Some(root_node) = graph.node(root) else {
        return Vec::new();
    };
    if root_node.has_no_successors() {
        return Vec::new();
    }

    let mut visited = vec![false; graph.node_count()];
    let mut stack = vec![root];
    let mut traversal = Vec::with_capacity(graph.node_count());
    visited[root.index()] = true;

    while let Some(&top) = stack.last() {
        // Scan the whole successor list; the last unvisited entry wins.
        let mut unvisited = None;
        for &succ in graph.nodes()[top.index()].successors() {
            if !visited[succ.index()] {
                unvisited = Some(succ);
            }
        }

        match unvisited {
            Some(next) => {
                visited[next.index()] = true;
                stack.push(next);
            }
            None => {
                stack.pop();
                traversal.push(top);
            }
        }
    }

    traversal
}

/// Computes the reverse post-order traversal of nodes reachable from `root`.
///
/// Reverse post-order is the [`post_order`] sequence reversed: a node comes
/// before any of its successors (back edges aside), which is the iteration
/// order the dominator builders need so that predecessors are placed before
/// the nodes they lead to.
///
/// # Examples
///
/// ```rust
/// use flowdom::graph::FlowGraph;
/// use flowdom::algorithms::reverse_post_order;
///
/// let mut graph: FlowGraph<()> = FlowGraph::new();
/// let a = graph.add_node("a")?;
/// let b = graph.add_node("b")?;
/// let c = graph.add_node("c")?;
/// graph.add_edge(a, b)?;
/// graph.add_edge(b, c)?;
///
/// assert_eq!(reverse_post_order(&graph, a), vec![a, b, c]);
/// # Ok::<(), flowdom::Error>(())
/// ```
#[must_use]
pub fn reverse_post_order<T>(graph: &FlowGraph<T>, root: NodeId) -> Vec<NodeId> {
    let mut traversal = post_order(graph, root);
    traversal.reverse();
    traversal
}

/// Walks backwards from `from` along uniformly random predecessors until a
/// node with no predecessors is reached, recording the path.
///
/// This is a diagnostic utility for sampling a single path back to a root;
/// it plays no part in dominance computation. The caller supplies the
/// random source, so tests can pin the sequence of choices with a seeded
/// generator.
///
/// Returns an empty sequence when `from` is out of range for the graph.
///
/// The walk only terminates at a predecessor-less node: on a graph where
/// every node reachable backwards from `from` has predecessors (a cycle),
/// it does not terminate.
///
/// # Examples
///
/// ```rust
/// use flowdom::graph::FlowGraph;
/// use flowdom::algorithms::random_walk_back;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut graph: FlowGraph<()> = FlowGraph::new();
/// let a = graph.add_node("a")?;
/// let b = graph.add_node("b")?;
/// graph.add_edge(a, b)?;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// assert_eq!(random_walk_back(&graph, b, &mut rng), vec![b, a]);
/// # Ok::<(), flowdom::Error>(())
/// ```
pub fn random_walk_back<T, R: Rng + ?Sized>(
    graph: &FlowGraph<T>,
    from: NodeId,
    rng: &mut R,
) -> Vec<NodeId> {
    if graph.node(from).is_none() {
        return Vec::new();
    }

    let mut walk = vec![from];
    let mut current = from;
    loop {
        let predecessors = graph.nodes()[current.index()].predecessors();
        if predecessors.is_empty() {
            return walk;
        }
        current = predecessors[rng.gen_range(0..predecessors.len())];
        walk.push(current);
    }
}
