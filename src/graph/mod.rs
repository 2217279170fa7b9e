//! Arena-based directed flow graph with designated START and END nodes.
//!
//! This module provides [`FlowGraph`], the container the dominator
//! algorithms operate on. Nodes live in an arena addressed by stable
//! [`NodeId`] indices, with adjacency stored as index lists; a label index
//! provides the string-keyed lookup that joins a flow graph with its derived
//! dominator tree.
//!
//! # Design
//!
//! All edge mutation goes through graph-owned operations
//! ([`FlowGraph::add_edge`], [`FlowGraph::clear_successors`], ...) which
//! update both adjacency directions together. Nodes expose read-only views
//! of their successor and predecessor lists, so the two directions cannot
//! diverge through node-local mutation.
//!
//! # Examples
//!
//! ```rust
//! use flowdom::graph::FlowGraph;
//!
//! // START and END come pre-wired with the edge START -> END; callers
//! // insert intermediate nodes and rewire.
//! let mut graph: FlowGraph<()> = FlowGraph::with_endpoints();
//! let start = graph.start().unwrap();
//! let end = graph.end().unwrap();
//!
//! let body = graph.add_node("body")?;
//! graph.add_edge(start, body)?;
//! graph.add_edge(body, end)?;
//!
//! assert!(graph.contains("body"));
//! assert_eq!(graph.node_count(), 3);
//! # Ok::<(), flowdom::Error>(())
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::Result;

mod node;

pub use node::{Node, NodeId};

/// Label of the designated entry node created by [`FlowGraph::with_endpoints`].
pub const START: &str = "START";

/// Label of the designated exit node created by [`FlowGraph::with_endpoints`].
pub const END: &str = "END";

/// A directed graph of labeled nodes with designated START and END.
///
/// `FlowGraph<T>` owns its nodes exclusively: a [`NodeId`] is only
/// meaningful for the graph that issued it, and nodes are never shared
/// between graphs. Derived graphs (a dominator tree, a reversed graph)
/// contain fresh nodes carrying the same labels; the label is the join key
/// across graphs.
///
/// Nodes are added and wired incrementally and never removed; algorithms
/// that need a different shape (the dominator-tree builders, edge reversal)
/// always produce a fresh graph.
///
/// # Type Parameters
///
/// * `T` - Optional per-node payload. The algorithms never inspect it; it
///   is carried for caller convenience.
#[derive(Debug, Clone)]
pub struct FlowGraph<T> {
    name: Option<String>,
    nodes: Vec<Node<T>>,
    labels: HashMap<String, NodeId>,
    start: Option<NodeId>,
    end: Option<NodeId>,
}

impl<T> Default for FlowGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FlowGraph<T> {
    /// Creates an empty graph with no nodes and no START/END designation.
    ///
    /// The empty variant exists as a scratch target: the dominator-tree
    /// builders populate one from scratch. A graph handed to the builders
    /// as *input* is expected to come from [`FlowGraph::with_endpoints`].
    #[must_use]
    pub fn new() -> Self {
        FlowGraph {
            name: None,
            nodes: Vec::new(),
            labels: HashMap::new(),
            start: None,
            end: None,
        }
    }

    /// Creates a graph pre-populated with fresh START and END nodes and the
    /// edge START → END already present.
    ///
    /// Callers subsequently insert intermediate nodes and rewire. The
    /// pre-wired edge keeps the graph well-formed from the first moment:
    /// START points somewhere and END is pointed at.
    #[must_use]
    pub fn with_endpoints() -> Self {
        let mut graph = Self::new();
        // Fresh graph, fixed labels: none of these operations can fail.
        let start = graph.intern_node(START.to_string(), None);
        let end = graph.intern_node(END.to_string(), None);
        graph.start = Some(start);
        graph.end = Some(end);
        graph.wire(start, end);
        graph
    }

    /// Same as [`FlowGraph::with_endpoints`], with a display name attached.
    ///
    /// The name only shows up in the [`Display`](fmt::Display) dump.
    #[must_use]
    pub fn with_endpoints_named(name: impl Into<String>) -> Self {
        let mut graph = Self::with_endpoints();
        graph.name = Some(name.into());
        graph
    }

    /// Returns the display name of this graph, if one was given.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the designated START node, if present.
    #[must_use]
    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    /// Returns the designated END node, if present.
    #[must_use]
    pub fn end(&self) -> Option<NodeId> {
        self.end
    }

    /// Returns the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph contains no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a node with the given label and no payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    /// the label is empty or collides with an existing node.
    pub fn add_node(&mut self, label: impl Into<String>) -> Result<NodeId> {
        self.insert(label.into(), None)
    }

    /// Adds a node with the given label and payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    /// the label is empty or collides with an existing node.
    pub fn add_node_with(&mut self, label: impl Into<String>, payload: T) -> Result<NodeId> {
        self.insert(label.into(), Some(payload))
    }

    fn insert(&mut self, label: String, payload: Option<T>) -> Result<NodeId> {
        if label.is_empty() {
            return Err(invalid_argument!("node label must not be empty"));
        }
        if self.labels.contains_key(&label) {
            return Err(invalid_argument!(
                "graph already contains a node labeled '{}'",
                label
            ));
        }
        Ok(self.intern_node(label, payload))
    }

    /// Infallible insertion for labels already known to be fresh.
    fn intern_node(&mut self, label: String, payload: Option<T>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.labels.insert(label.clone(), id);
        self.nodes.push(Node::new(label, payload));
        id
    }

    /// Adds the directed edge `from -> to`.
    ///
    /// Appends `to` to `from`'s successor list and registers `from` as a
    /// predecessor of `to` in one operation. Duplicate edges are kept;
    /// successor lists are not deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    /// either id does not belong to this graph.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        self.check_id(from)?;
        self.check_id(to)?;
        self.wire(from, to);
        Ok(())
    }

    /// Adds the directed edges `from -> to` for every id in `targets`, in
    /// order.
    ///
    /// This is the bulk form used to fan a branch out to several successors
    /// at once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    /// any id does not belong to this graph; no edges are added in that
    /// case.
    pub fn add_edges(&mut self, from: NodeId, targets: &[NodeId]) -> Result<()> {
        self.check_id(from)?;
        for &to in targets {
            self.check_id(to)?;
        }
        for &to in targets {
            self.wire(from, to);
        }
        Ok(())
    }

    fn wire(&mut self, from: NodeId, to: NodeId) {
        self.nodes[from.index()].push_successor(to);
        self.nodes[to.index()].push_predecessor(from);
    }

    fn check_id(&self, id: NodeId) -> Result<()> {
        if id.index() >= self.nodes.len() {
            return Err(invalid_argument!(
                "node {} does not belong to this graph ({} nodes)",
                id,
                self.nodes.len()
            ));
        }
        Ok(())
    }

    /// Returns `true` if the graph contains a node with the given label.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains_key(label)
    }

    /// Looks up a node by its label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    /// no node carries the label.
    pub fn node_by_label(&self, label: &str) -> Result<NodeId> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| invalid_argument!("graph contains no node labeled '{}'", label))
    }

    /// Returns the node stored under `id`, or `None` if the id is out of
    /// range for this graph.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.index())
    }

    /// Returns all nodes in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }

    /// Returns an iterator over all node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId::new)
    }

    /// Removes every outgoing edge of `id`, unregistering `id` from the
    /// predecessor list of each former successor.
    ///
    /// Parallel edges are unwound one occurrence at a time, keeping the two
    /// adjacency directions balanced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    /// the id does not belong to this graph.
    pub fn clear_successors(&mut self, id: NodeId) -> Result<()> {
        self.check_id(id)?;
        let successors = self.nodes[id.index()].take_successors();
        for to in successors {
            self.nodes[to.index()].remove_predecessor_once(id);
        }
        Ok(())
    }

    /// Removes every incoming edge of `id`, unregistering `id` from the
    /// successor list of each former predecessor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    /// the id does not belong to this graph.
    pub fn clear_predecessors(&mut self, id: NodeId) -> Result<()> {
        self.check_id(id)?;
        let predecessors = self.nodes[id.index()].take_predecessors();
        for from in predecessors {
            self.nodes[from.index()].remove_successor_once(id);
        }
        Ok(())
    }
}

impl<T: Clone> FlowGraph<T> {
    /// Produces a new graph with identical node labels and payloads and
    /// every edge direction flipped.
    ///
    /// The START/END designations swap along with the edges, so the result
    /// is again a well-formed flow graph rooted at the old exit. Building
    /// the dominator tree of the reversed graph yields the **post-dominator**
    /// tree of the original; the construction algorithm itself is
    /// edge-direction agnostic.
    ///
    /// ```rust
    /// use flowdom::graph::FlowGraph;
    ///
    /// let graph: FlowGraph<()> = FlowGraph::with_endpoints();
    /// let reversed = graph.reverse_edges();
    ///
    /// let start = reversed.start().unwrap();
    /// assert_eq!(reversed.node(start).unwrap().label(), "END");
    /// ```
    #[must_use]
    pub fn reverse_edges(&self) -> FlowGraph<T> {
        let mut reversed = FlowGraph::new();
        reversed.name = self.name.clone();
        for node in &self.nodes {
            reversed.intern_node(node.label().to_string(), node.payload().cloned());
        }
        for (index, node) in self.nodes.iter().enumerate() {
            let from = NodeId::new(index);
            for &to in node.successors() {
                reversed.wire(to, from);
            }
        }
        reversed.start = self.end;
        reversed.end = self.start;
        reversed
    }
}

impl<T> FlowGraph<T> {
    pub(crate) fn designate_start(&mut self, id: NodeId) {
        self.start = Some(id);
    }
}

impl<T> fmt::Display for FlowGraph<T> {
    /// Renders a DOT-style `digraph` dump for diagnostics.
    ///
    /// The output lists every node, then every edge in insertion order. It
    /// is meant for logging and debugging and carries no compatibility
    /// contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => writeln!(f, "digraph \"{}\" {{", escape(name))?,
            None => writeln!(f, "digraph {{")?,
        }
        for node in &self.nodes {
            writeln!(f, "  \"{}\"", escape(node.label()))?;
        }
        writeln!(f)?;
        for node in &self.nodes {
            for &to in node.successors() {
                writeln!(
                    f,
                    "  \"{}\" -> \"{}\"",
                    escape(node.label()),
                    escape(self.nodes[to.index()].label())
                )?;
            }
        }
        write!(f, "}}")
    }
}

/// Escapes a label for safe use inside a double-quoted DOT identifier.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_empty_graph() {
        let graph: FlowGraph<()> = FlowGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert!(graph.start().is_none());
        assert!(graph.end().is_none());
    }

    #[test]
    fn test_with_endpoints_prewired() {
        let graph: FlowGraph<()> = FlowGraph::with_endpoints();
        let start = graph.start().unwrap();
        let end = graph.end().unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node(start).unwrap().label(), START);
        assert_eq!(graph.node(end).unwrap().label(), END);

        // START -> END is already present
        assert_eq!(graph.node(start).unwrap().successors(), &[end]);
        assert_eq!(graph.node(end).unwrap().predecessors(), &[start]);
        assert!(graph.node(start).unwrap().has_no_predecessors());
        assert!(graph.node(end).unwrap().has_no_successors());
    }

    #[test]
    fn test_named_graph() {
        let graph: FlowGraph<()> = FlowGraph::with_endpoints_named("fischer");
        assert_eq!(graph.name(), Some("fischer"));
    }

    #[test]
    fn test_add_node_and_lookup() {
        let mut graph: FlowGraph<()> = FlowGraph::new();
        let a = graph.add_node("a").unwrap();

        assert!(graph.contains("a"));
        assert!(!graph.contains("b"));
        assert_eq!(graph.node_by_label("a").unwrap(), a);
    }

    #[test]
    fn test_add_node_empty_label() {
        let mut graph: FlowGraph<()> = FlowGraph::new();
        assert!(matches!(
            graph.add_node(""),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_add_node_label_collision() {
        let mut graph: FlowGraph<()> = FlowGraph::new();
        graph.add_node("a").unwrap();

        let err = graph.add_node("a").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert!(err.to_string().contains('a'));
    }

    #[test]
    fn test_lookup_unknown_label() {
        let graph: FlowGraph<()> = FlowGraph::new();
        assert!(matches!(
            graph.node_by_label("missing"),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_add_node_with_payload() {
        let mut graph: FlowGraph<i32> = FlowGraph::new();
        let a = graph.add_node_with("a", 7).unwrap();
        assert_eq!(graph.node(a).unwrap().payload(), Some(&7));
    }

    #[test]
    fn test_add_edge_updates_both_directions() {
        let mut graph: FlowGraph<()> = FlowGraph::new();
        let a = graph.add_node("a").unwrap();
        let b = graph.add_node("b").unwrap();

        graph.add_edge(a, b).unwrap();

        assert_eq!(graph.node(a).unwrap().successors(), &[b]);
        assert_eq!(graph.node(b).unwrap().predecessors(), &[a]);
    }

    #[test]
    fn test_add_edge_out_of_range() {
        let mut graph: FlowGraph<()> = FlowGraph::new();
        let a = graph.add_node("a").unwrap();

        assert!(matches!(
            graph.add_edge(a, NodeId::new(5)),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_duplicate_edges_kept() {
        let mut graph: FlowGraph<()> = FlowGraph::new();
        let a = graph.add_node("a").unwrap();
        let b = graph.add_node("b").unwrap();

        graph.add_edge(a, b).unwrap();
        graph.add_edge(a, b).unwrap();

        assert_eq!(graph.node(a).unwrap().successor_count(), 2);
        assert_eq!(graph.node(b).unwrap().predecessors(), &[a, a]);
    }

    #[test]
    fn test_add_edges_bulk() {
        let mut graph: FlowGraph<()> = FlowGraph::new();
        let a = graph.add_node("a").unwrap();
        let b = graph.add_node("b").unwrap();
        let c = graph.add_node("c").unwrap();

        graph.add_edges(a, &[b, c]).unwrap();

        assert_eq!(graph.node(a).unwrap().successors(), &[b, c]);
        assert_eq!(graph.node(b).unwrap().predecessors(), &[a]);
        assert_eq!(graph.node(c).unwrap().predecessors(), &[a]);
    }

    #[test]
    fn test_clear_successors() {
        let mut graph: FlowGraph<()> = FlowGraph::new();
        let a = graph.add_node("a").unwrap();
        let b = graph.add_node("b").unwrap();
        let c = graph.add_node("c").unwrap();
        graph.add_edges(a, &[b, c]).unwrap();
        graph.add_edge(c, b).unwrap();

        graph.clear_successors(a).unwrap();

        assert!(graph.node(a).unwrap().has_no_successors());
        // Only a's edges disappeared; c -> b survives.
        assert_eq!(graph.node(b).unwrap().predecessors(), &[c]);
        assert!(graph.node(c).unwrap().has_no_predecessors());
    }

    #[test]
    fn test_clear_predecessors() {
        let mut graph: FlowGraph<()> = FlowGraph::new();
        let a = graph.add_node("a").unwrap();
        let b = graph.add_node("b").unwrap();
        let c = graph.add_node("c").unwrap();
        graph.add_edge(a, c).unwrap();
        graph.add_edge(b, c).unwrap();

        graph.clear_predecessors(c).unwrap();

        assert!(graph.node(c).unwrap().has_no_predecessors());
        assert!(graph.node(a).unwrap().has_no_successors());
        assert!(graph.node(b).unwrap().has_no_successors());
    }

    #[test]
    fn test_clear_successors_parallel_edges() {
        let mut graph: FlowGraph<()> = FlowGraph::new();
        let a = graph.add_node("a").unwrap();
        let b = graph.add_node("b").unwrap();
        graph.add_edge(a, b).unwrap();
        graph.add_edge(a, b).unwrap();

        graph.clear_successors(a).unwrap();

        assert!(graph.node(a).unwrap().has_no_successors());
        assert!(graph.node(b).unwrap().has_no_predecessors());
    }

    #[test]
    fn test_reverse_edges() {
        let mut graph: FlowGraph<i32> = FlowGraph::with_endpoints();
        let start = graph.start().unwrap();
        let end = graph.end().unwrap();
        let a = graph.add_node_with("a", 1).unwrap();
        graph.add_edge(start, a).unwrap();
        graph.add_edge(a, end).unwrap();

        let reversed = graph.reverse_edges();

        assert_eq!(reversed.node_count(), graph.node_count());
        // START/END designations swap with the edges.
        let r_start = reversed.start().unwrap();
        let r_end = reversed.end().unwrap();
        assert_eq!(reversed.node(r_start).unwrap().label(), END);
        assert_eq!(reversed.node(r_end).unwrap().label(), START);

        // Every edge is flipped: END -> a -> START (plus END -> START).
        let ra = reversed.node_by_label("a").unwrap();
        assert!(reversed.node(r_start).unwrap().successors().contains(&ra));
        assert_eq!(reversed.node(ra).unwrap().successors(), &[r_end]);

        // Payloads survive the reversal.
        assert_eq!(reversed.node(ra).unwrap().payload(), Some(&1));
    }

    #[test]
    fn test_reverse_twice_restores_edges() {
        let mut graph: FlowGraph<()> = FlowGraph::with_endpoints();
        let start = graph.start().unwrap();
        let end = graph.end().unwrap();
        let a = graph.add_node("a").unwrap();
        graph.add_edge(start, a).unwrap();
        graph.add_edge(a, end).unwrap();

        let round_trip = graph.reverse_edges().reverse_edges();

        assert_eq!(round_trip.start(), graph.start());
        assert_eq!(round_trip.end(), graph.end());
        for id in graph.node_ids() {
            assert_eq!(
                round_trip.node(id).unwrap().successors(),
                graph.node(id).unwrap().successors()
            );
        }
    }

    #[test]
    fn test_display_dump() {
        let mut graph: FlowGraph<()> = FlowGraph::new();
        let a = graph.add_node("a").unwrap();
        let b = graph.add_node("b").unwrap();
        graph.add_edge(a, b).unwrap();

        let printed = graph.to_string();
        let expected = "digraph {\n  \"a\"\n  \"b\"\n\n  \"a\" -> \"b\"\n}";
        assert_eq!(printed, expected);
    }

    #[test]
    fn test_display_escapes_quotes() {
        let mut graph: FlowGraph<()> = FlowGraph::new();
        graph.add_node("say \"hi\"").unwrap();

        assert!(graph.to_string().contains("\"say \\\"hi\\\"\""));
    }
}
