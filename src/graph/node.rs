//! Node identifier and node storage for flow graphs.
//!
//! This module provides [`NodeId`], a strongly-typed arena index for nodes
//! within a [`FlowGraph`](crate::graph::FlowGraph), and [`Node`], the stored
//! vertex itself: a unique label, an optional payload, and the two adjacency
//! lists (successors and the derived predecessors).

use std::fmt;

/// A strongly-typed identifier for nodes within a flow graph.
///
/// `NodeId` wraps a `usize` arena index, providing type safety to prevent
/// accidental mixing of node indices with other integer values. Node IDs are
/// assigned sequentially starting from 0 when nodes are added to a graph and
/// remain stable for the lifetime of the graph (nodes are never removed).
///
/// # Usage
///
/// Node IDs are created by [`FlowGraph::add_node`](crate::graph::FlowGraph::add_node)
/// and should not typically be constructed manually. They are used to:
///
/// - Reference nodes when adding edges
/// - Look up node data and adjacency
/// - Store analysis results indexed by node
///
/// A `NodeId` is only meaningful for the graph that issued it; the label is
/// the join key when bridging between a flow graph and its dominator tree.
///
/// # Examples
///
/// ```rust
/// use flowdom::graph::{FlowGraph, NodeId};
///
/// let mut graph: FlowGraph<&str> = FlowGraph::new();
/// let a: NodeId = graph.add_node("a")?;
/// let b: NodeId = graph.add_node("b")?;
///
/// assert_ne!(a, b);
/// assert_eq!(a.index(), 0);
/// # Ok::<(), flowdom::Error>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Creates a new `NodeId` from a raw index value.
    ///
    /// This constructor is primarily intended for internal use and testing.
    /// Normal usage should obtain `NodeId` values from
    /// [`FlowGraph::add_node`](crate::graph::FlowGraph::add_node).
    #[must_use]
    #[inline]
    pub const fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Returns the raw index value of this node identifier.
    ///
    /// The index is a 0-based position that can be used to index into
    /// vectors that store per-node data.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl From<usize> for NodeId {
    /// Converts a raw `usize` index into a `NodeId`.
    ///
    /// This conversion is provided for convenience but should be used
    /// carefully to avoid creating ids that don't correspond to actual
    /// nodes in a graph.
    #[inline]
    fn from(index: usize) -> Self {
        NodeId(index)
    }
}

impl From<NodeId> for usize {
    /// Extracts the raw index from a `NodeId`.
    #[inline]
    fn from(node: NodeId) -> Self {
        node.0
    }
}

/// A vertex stored in a [`FlowGraph`](crate::graph::FlowGraph).
///
/// Each node carries a label unique within its owning graph, an optional
/// payload of type `T` (unused by the algorithms, carried for caller
/// convenience), and two adjacency lists: the ordered successors (edges
/// out) and the derived predecessors (edges in).
///
/// Both lists reference only nodes within the same owning graph, and they
/// are kept consistent by the graph: adding the edge `a -> b` through
/// [`FlowGraph::add_edge`](crate::graph::FlowGraph::add_edge) appends `b` to
/// `a`'s successors and `a` to `b`'s predecessors in one operation. Nodes
/// expose no mutation of their own, which rules out the two lists ever
/// drifting apart.
///
/// Duplicate edges are kept as-is; successor lists are not deduplicated.
#[derive(Debug, Clone)]
pub struct Node<T> {
    label: String,
    payload: Option<T>,
    successors: Vec<NodeId>,
    predecessors: Vec<NodeId>,
}

impl<T> Node<T> {
    pub(crate) fn new(label: String, payload: Option<T>) -> Self {
        Node {
            label,
            payload,
            successors: Vec::new(),
            predecessors: Vec::new(),
        }
    }

    /// Returns the label of this node, unique within its owning graph.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the payload attached to this node, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Returns the ordered successor list (edges out of this node).
    #[must_use]
    pub fn successors(&self) -> &[NodeId] {
        &self.successors
    }

    /// Returns the ordered predecessor list (edges into this node).
    #[must_use]
    pub fn predecessors(&self) -> &[NodeId] {
        &self.predecessors
    }

    /// Returns the number of outgoing edges, counting duplicates.
    #[must_use]
    pub fn successor_count(&self) -> usize {
        self.successors.len()
    }

    /// Returns `true` if this node has no outgoing edges.
    ///
    /// In a well-formed flow graph this holds for the END node only.
    #[must_use]
    pub fn has_no_successors(&self) -> bool {
        self.successors.is_empty()
    }

    /// Returns `true` if this node has no incoming edges.
    ///
    /// In a well-formed flow graph this holds for the START node only.
    #[must_use]
    pub fn has_no_predecessors(&self) -> bool {
        self.predecessors.is_empty()
    }

    pub(crate) fn push_successor(&mut self, to: NodeId) {
        self.successors.push(to);
    }

    pub(crate) fn push_predecessor(&mut self, from: NodeId) {
        self.predecessors.push(from);
    }

    pub(crate) fn take_successors(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.successors)
    }

    pub(crate) fn take_predecessors(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.predecessors)
    }

    // Removes one occurrence only, so parallel edges stay balanced.
    pub(crate) fn remove_successor_once(&mut self, to: NodeId) {
        if let Some(pos) = self.successors.iter().position(|s| *s == to) {
            self.successors.remove(pos);
        }
    }

    pub(crate) fn remove_predecessor_once(&mut self, from: NodeId) {
        if let Some(pos) = self.predecessors.iter().position(|p| *p == from) {
            self.predecessors.remove(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_node_id_new() {
        let node = NodeId::new(42);
        assert_eq!(node.index(), 42);
    }

    #[test]
    fn test_node_id_equality() {
        let node1 = NodeId::new(5);
        let node2 = NodeId::new(5);
        let node3 = NodeId::new(10);

        assert_eq!(node1, node2);
        assert_ne!(node1, node3);
    }

    #[test]
    fn test_node_id_ordering() {
        let mut nodes = vec![NodeId::new(3), NodeId::new(1), NodeId::new(2)];
        nodes.sort();
        assert_eq!(nodes, vec![NodeId::new(1), NodeId::new(2), NodeId::new(3)]);
    }

    #[test]
    fn test_node_id_hash() {
        let mut set: HashSet<NodeId> = HashSet::new();
        set.insert(NodeId::new(1));
        set.insert(NodeId::new(2));
        set.insert(NodeId::new(1)); // Should not add duplicate

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_node_id_as_map_key() {
        let mut map: HashMap<NodeId, &str> = HashMap::new();
        map.insert(NodeId::new(1), "first");
        map.insert(NodeId::new(2), "second");

        assert_eq!(map.get(&NodeId::new(1)), Some(&"first"));
        assert_eq!(map.get(&NodeId::new(3)), None);
    }

    #[test]
    fn test_node_id_conversions() {
        let node: NodeId = 123usize.into();
        assert_eq!(node.index(), 123);

        let value: usize = NodeId::new(789).into();
        assert_eq!(value, 789);
    }

    #[test]
    fn test_node_id_debug_and_display() {
        let node = NodeId::new(42);
        assert_eq!(format!("{node:?}"), "NodeId(42)");
        assert_eq!(format!("{node}"), "n42");
    }

    #[test]
    fn test_node_fresh_has_no_edges() {
        let node: Node<()> = Node::new("a".to_string(), None);
        assert_eq!(node.label(), "a");
        assert!(node.payload().is_none());
        assert!(node.has_no_successors());
        assert!(node.has_no_predecessors());
        assert_eq!(node.successor_count(), 0);
    }

    #[test]
    fn test_node_payload() {
        let node = Node::new("a".to_string(), Some(7));
        assert_eq!(node.payload(), Some(&7));
    }
}
