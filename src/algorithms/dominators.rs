//! Dominator-tree construction for flow graphs.
//!
//! A node A *dominates* a node B when every path from START to B passes
//! through A. The *immediate* dominator of B is the unique closest such A,
//! and the immediate-dominator relation forms a tree rooted at START: the
//! dominator tree this module builds.
//!
//! The primary builder ([`DominatorMethod::SinglePass`]) walks the flow
//! graph in reverse post-order and derives each node's immediate dominator
//! by folding a [`lowest_common_ancestor`] query over the predecessors
//! already placed in the growing tree. One pass suffices for reducible
//! control flow, which is what structured source compiles to. For
//! irreducible graphs (multi-entry loops) the iterative
//! [`DominatorMethod::Fixpoint`] variant is available; it intersects
//! candidate dominators by post-order position and sweeps until nothing
//! changes, as described by Cooper, Harvey and Kennedy in "A Simple, Fast
//! Dominance Algorithm".
//!
//! Both builders are pure functions of the input graph and produce a fresh
//! [`FlowGraph`] whose edges are the immediate-dominator relation; nodes in
//! the tree carry the same labels as the flow graph, which is the join key
//! between the two.
//!
//! Post-dominators fall out for free: the builders never care which
//! direction the edges "mean", so running them on
//! [`FlowGraph::reverse_edges`] yields the post-dominator tree rooted at
//! END.

use tracing::{debug, trace};

use super::traversal::reverse_post_order;
use crate::graph::{FlowGraph, NodeId};
use crate::Result;

/// Marks a post-order position whose immediate dominator is not yet known
/// during the fixpoint sweep.
const UNDEFINED: usize = usize::MAX;

/// Selects which algorithm [`build_dominator_tree_with`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DominatorMethod {
    /// Single reverse-post-order pass folding tree LCA over placed
    /// predecessors. Fast and exact for reducible control flow; fails with
    /// [`Error::InvalidState`](crate::Error::InvalidState) when the input
    /// defeats its placement assumption.
    #[default]
    SinglePass,

    /// Iterative dominance intersection by post-order position, swept to a
    /// fixpoint. Handles irreducible control flow at the cost of extra
    /// sweeps.
    Fixpoint,
}

/// Builds the dominator tree of `flow` with the default single-pass method.
///
/// The returned graph contains one node per flow-graph node, carrying the
/// same label, and one edge per immediate-dominator relationship. Its START
/// designation points at the tree root (the flow graph's START); it has no
/// END designation, since a dominator tree has no distinguished exit.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) when
/// `flow` is empty, lacks a START or END designation, when START has no
/// outgoing edge, or when END has no incoming edge.
///
/// Returns [`Error::InvalidState`](crate::Error::InvalidState) when some
/// node is unreachable from START, or when the single-pass placement
/// assumption fails on irreducible input (retry with
/// [`DominatorMethod::Fixpoint`]).
///
/// # Examples
///
/// ```rust
/// use flowdom::prelude::*;
///
/// // START -> a -> END
/// let mut cfg: FlowGraph<()> = FlowGraph::with_endpoints();
/// let start = cfg.start().unwrap();
/// let end = cfg.end().unwrap();
/// cfg.clear_successors(start)?;
/// let a = cfg.add_node("a")?;
/// cfg.add_edge(start, a)?;
/// cfg.add_edge(a, end)?;
///
/// let tree = build_dominator_tree(&cfg)?;
/// let a_t = tree.node_by_label("a")?;
/// let end_t = tree.node_by_label(END)?;
/// assert_eq!(tree.node(a_t).unwrap().successors(), &[end_t]);
/// # Ok::<(), flowdom::Error>(())
/// ```
pub fn build_dominator_tree<T>(flow: &FlowGraph<T>) -> Result<FlowGraph<T>> {
    build_dominator_tree_with(flow, DominatorMethod::default())
}

/// Builds the dominator tree of `flow` with an explicitly chosen method.
///
/// See [`build_dominator_tree`] for the shape of the result and the shared
/// precondition errors. Both methods agree on reducible control flow; on
/// irreducible input only [`DominatorMethod::Fixpoint`] is guaranteed to
/// produce the exact dominator tree.
///
/// # Errors
///
/// Same as [`build_dominator_tree`]; the irreducible-input
/// [`Error::InvalidState`](crate::Error::InvalidState) can only arise with
/// [`DominatorMethod::SinglePass`].
pub fn build_dominator_tree_with<T>(
    flow: &FlowGraph<T>,
    method: DominatorMethod,
) -> Result<FlowGraph<T>> {
    let start = check_flow_graph(flow)?;

    let order = reverse_post_order(flow, start);
    if order.len() != flow.node_count() {
        return Err(invalid_state!(
            "reverse post-order covers {} of {} nodes; every node must be reachable from '{}'",
            order.len(),
            flow.node_count(),
            flow.nodes()[start.index()].label()
        ));
    }

    debug!(nodes = order.len(), method = ?method, "building dominator tree");
    match method {
        DominatorMethod::SinglePass => single_pass(flow, &order),
        DominatorMethod::Fixpoint => fixpoint(flow, &order),
    }
}

/// Validates the builder preconditions and returns the START node.
fn check_flow_graph<T>(flow: &FlowGraph<T>) -> Result<NodeId> {
    if flow.is_empty() {
        return Err(invalid_argument!("flow graph is empty"));
    }
    let Some(start) = flow.start() else {
        return Err(invalid_argument!("flow graph has no START designation"));
    };
    let Some(end) = flow.end() else {
        return Err(invalid_argument!("flow graph has no END designation"));
    };
    if flow.nodes()[start.index()].has_no_successors() {
        return Err(invalid_argument!(
            "flow graph's start node '{}' points to nothing",
            flow.nodes()[start.index()].label()
        ));
    }
    if flow.nodes()[end.index()].has_no_predecessors() {
        return Err(invalid_argument!(
            "flow graph's end node '{}' is pointed to by nothing",
            flow.nodes()[end.index()].label()
        ));
    }
    Ok(start)
}

/// Single reverse-post-order pass building the tree incrementally.
///
/// The first node of `order` is the root and seeds the tree. Every later
/// node folds [`lowest_common_ancestor`] over those of its predecessors
/// that are already placed; reverse post-order guarantees at least one is
/// (the node's depth-first tree parent), so the fold always yields an
/// immediate dominator on inputs this method supports.
fn single_pass<T>(flow: &FlowGraph<T>, order: &[NodeId]) -> Result<FlowGraph<T>> {
    let mut tree: FlowGraph<T> = FlowGraph::new();
    // Flow-graph id -> id of the same-labeled node in the growing tree.
    let mut placed: Vec<Option<NodeId>> = vec![None; flow.node_count()];

    let root = order[0];
    let tree_root = tree.add_node(flow.nodes()[root.index()].label())?;
    tree.designate_start(tree_root);
    placed[root.index()] = Some(tree_root);

    for &flow_id in &order[1..] {
        let mut idom: Option<NodeId> = None;
        for &pred in flow.nodes()[flow_id.index()].predecessors() {
            let Some(pred_in_tree) = placed[pred.index()] else {
                // Not placed yet (back edge or self-loop); skip.
                continue;
            };
            idom = Some(match idom {
                None => pred_in_tree,
                Some(current) => lowest_common_ancestor(&tree, current, pred_in_tree)?,
            });
        }

        let label = flow.nodes()[flow_id.index()].label();
        let Some(idom) = idom else {
            return Err(invalid_state!(
                "no predecessor of '{}' is placed in the dominator tree yet; \
                 the control flow is irreducible, retry with the fixpoint method",
                label
            ));
        };

        let tree_id = tree.add_node(label)?;
        tree.add_edge(idom, tree_id)?;
        placed[flow_id.index()] = Some(tree_id);
        trace!(node = %label, idom = %tree.nodes()[idom.index()].label(), "placed node");
    }

    Ok(tree)
}

/// Iterative dominance intersection in post-order-position space.
///
/// Positions index nodes by their post-order rank, so "walk towards the
/// root" is "step to a strictly larger position" and the two-finger
/// intersection of [`intersect`] stays cheap. Sweeps repeat in reverse
/// post-order until no immediate dominator changes.
fn fixpoint<T>(flow: &FlowGraph<T>, order: &[NodeId]) -> Result<FlowGraph<T>> {
    let count = flow.node_count();

    // Post-order position of each node; the root sits at count - 1.
    let mut position = vec![0usize; count];
    for (pos, &id) in order.iter().rev().enumerate() {
        position[id.index()] = pos;
    }
    let mut at_position = vec![order[0]; count];
    for &id in order {
        at_position[position[id.index()]] = id;
    }

    let root = order[0];
    let root_pos = position[root.index()];
    let mut idom = vec![UNDEFINED; count];
    idom[root_pos] = root_pos;

    let mut sweeps = 0usize;
    let mut changed = true;
    while changed {
        changed = false;
        sweeps += 1;
        for &flow_id in &order[1..] {
            let mut new_idom = UNDEFINED;
            for &pred in flow.nodes()[flow_id.index()].predecessors() {
                let pred_pos = position[pred.index()];
                if idom[pred_pos] == UNDEFINED {
                    continue;
                }
                new_idom = if new_idom == UNDEFINED {
                    pred_pos
                } else {
                    intersect(&idom, new_idom, pred_pos)
                };
            }
            let node_pos = position[flow_id.index()];
            if new_idom != idom[node_pos] {
                idom[node_pos] = new_idom;
                changed = true;
            }
        }
    }
    debug!(sweeps, "dominance fixpoint reached");

    // Materialize the idom relation as a tree. A node's immediate dominator
    // always precedes it in reverse post-order, so parents exist before
    // their children are wired in.
    let mut tree: FlowGraph<T> = FlowGraph::new();
    let mut placed: Vec<Option<NodeId>> = vec![None; count];
    let tree_root = tree.add_node(flow.nodes()[root.index()].label())?;
    tree.designate_start(tree_root);
    placed[root.index()] = Some(tree_root);

    for &flow_id in &order[1..] {
        let label = flow.nodes()[flow_id.index()].label();
        let idom_pos = idom[position[flow_id.index()]];
        if idom_pos == UNDEFINED {
            return Err(invalid_state!(
                "fixpoint left '{}' without an immediate dominator",
                label
            ));
        }
        let idom_flow_id = at_position[idom_pos];
        let Some(parent) = placed[idom_flow_id.index()] else {
            return Err(invalid_state!(
                "immediate dominator '{}' of '{}' is not placed in the tree",
                flow.nodes()[idom_flow_id.index()].label(),
                label
            ));
        };
        let tree_id = tree.add_node(label)?;
        tree.add_edge(parent, tree_id)?;
        placed[flow_id.index()] = Some(tree_id);
    }

    Ok(tree)
}

/// Two-finger intersection of dominator chains by post-order position.
///
/// Both fingers must point at positions whose immediate dominator is
/// already known; the sweep order of [`fixpoint`] guarantees that. Each
/// step moves the smaller finger up its dominator chain (towards the root
/// at the largest position) until the fingers meet.
fn intersect(idom: &[usize], finger1: usize, finger2: usize) -> usize {
    let (mut finger1, mut finger2) = (finger1, finger2);
    while finger1 != finger2 {
        while finger1 < finger2 {
            finger1 = idom[finger1];
        }
        while finger2 < finger1 {
            finger2 = idom[finger2];
        }
    }
    finger1
}

/// Finds the lowest common ancestor of two nodes in a tree-shaped graph.
///
/// Both paths to the root are materialized and compared from the root end;
/// the last position at which they agree is the LCA. `lowest_common_ancestor`
/// of a node with itself is the node.
///
/// The graph must be a tree: every node on the two root paths has at most
/// one predecessor, and both paths reach a common root. Dominator trees
/// produced by the builders satisfy this by construction.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) when
/// either id is out of range for `tree`.
///
/// Returns [`Error::InvalidState`](crate::Error::InvalidState) when a node
/// on a root path has more than one predecessor (the graph is not a tree),
/// or when the two paths share no node (a forest).
///
/// # Examples
///
/// ```rust
/// use flowdom::graph::FlowGraph;
/// use flowdom::algorithms::lowest_common_ancestor;
///
/// //     root
/// //    /    \
/// //  left  right
/// let mut tree: FlowGraph<()> = FlowGraph::new();
/// let root = tree.add_node("root")?;
/// let left = tree.add_node("left")?;
/// let right = tree.add_node("right")?;
/// tree.add_edge(root, left)?;
/// tree.add_edge(root, right)?;
///
/// assert_eq!(lowest_common_ancestor(&tree, left, right)?, root);
/// assert_eq!(lowest_common_ancestor(&tree, left, left)?, left);
/// # Ok::<(), flowdom::Error>(())
/// ```
pub fn lowest_common_ancestor<T>(tree: &FlowGraph<T>, a: NodeId, b: NodeId) -> Result<NodeId> {
    let path_a = path_to_root(tree, a)?;
    let path_b = path_to_root(tree, b)?;

    let mut lca = None;
    let mut steps_a = path_a.iter().rev();
    let mut steps_b = path_b.iter().rev();
    while let (Some(&step_a), Some(&step_b)) = (steps_a.next(), steps_b.next()) {
        if step_a != step_b {
            break;
        }
        lca = Some(step_a);
    }

    lca.ok_or_else(|| {
        invalid_state!(
            "'{}' and '{}' share no ancestor; the graph is a forest, not a tree",
            tree.nodes()[a.index()].label(),
            tree.nodes()[b.index()].label()
        )
    })
}

/// Collects the path from `from` up to the root, inclusive at both ends.
fn path_to_root<T>(tree: &FlowGraph<T>, from: NodeId) -> Result<Vec<NodeId>> {
    let Some(mut node) = tree.node(from) else {
        return Err(invalid_argument!(
            "node {} does not belong to this graph ({} nodes)",
            from,
            tree.node_count()
        ));
    };

    let mut path = vec![from];
    loop {
        match *node.predecessors() {
            [] => return Ok(path),
            [parent] => {
                path.push(parent);
                node = &tree.nodes()[parent.index()];
            }
            _ => {
                return Err(invalid_state!(
                    "node '{}' has {} predecessors; the graph is not a tree",
                    node.label(),
                    node.predecessors().len()
                ))
            }
        }
    }
}
