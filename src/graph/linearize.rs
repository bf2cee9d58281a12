//! Deterministic linearization of workflow graphs.
//!
//! Any rendering that wants a stable left-to-right sequence of steps (a
//! step indicator, a table of nodes) needs one total ordering of the graph
//! that never changes between calls. The ordering here is a presentation
//! contract, not an execution order: fork/join concurrency is deliberately
//! collapsed into a single sequence.
//!
//! The algorithm is a breadth-first traversal from the `start` node that
//! follows outgoing edges in persisted order. A visited-set guard makes it
//! convergent on any input, including graphs with back-edges or multiple
//! inbound edges (`join` nodes). Nodes the traversal never reaches are
//! appended afterwards sorted by node id, so the output always contains
//! every node exactly once.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use super::Graph;
use crate::types::NodeId;

/// Traversal algorithms for [`Graph`].
impl Graph {
    /// Produces the deterministic total ordering of this graph's nodes.
    ///
    /// Guarantees, for any graph shape (connected, disconnected, or cyclic):
    ///
    /// - output length equals [`node_count`](Self::node_count), no duplicates
    /// - calling twice on the same graph yields byte-identical output
    /// - BFS order from `start` for the reachable portion, node-id order
    ///   for the unreached remainder
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flowlens::graph::{Graph, WorkflowEdge, WorkflowNode};
    /// use flowlens::types::{NodeId, NodeType};
    ///
    /// let graph = Graph::from_parts(
    ///     "tpl",
    ///     vec![
    ///         WorkflowNode::new("start", NodeType::Start),
    ///         WorkflowNode::new("a", NodeType::Task),
    ///         WorkflowNode::new("end", NodeType::End),
    ///     ],
    ///     vec![
    ///         WorkflowEdge::new("e1", "start", "a"),
    ///         WorkflowEdge::new("e2", "a", "end"),
    ///     ],
    /// );
    ///
    /// let order: Vec<NodeId> = graph.linearize();
    /// assert_eq!(order, vec!["start".into(), "a".into(), "end".into()]);
    /// ```
    #[must_use]
    pub fn linearize(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.node_count());
        let mut visited: FxHashSet<NodeId> = FxHashSet::default();
        let mut queue: VecDeque<NodeId> = VecDeque::new();

        if let Some(start) = self.start_node() {
            visited.insert(start.id.clone());
            queue.push_back(start.id.clone());
        }

        while let Some(id) = queue.pop_front() {
            order.push(id.clone());
            for edge in self.outgoing(&id) {
                // Dangling targets never enter the order; they are reported
                // by validate() instead.
                if !self.contains(&edge.target) {
                    continue;
                }
                if visited.insert(edge.target.clone()) {
                    queue.push_back(edge.target.clone());
                }
            }
        }

        // Total ordering: disconnected and pre-start nodes are appended in
        // node-id order so no node is ever dropped from the display.
        let mut unreached: Vec<NodeId> = self
            .node_ids()
            .filter(|id| !visited.contains(*id))
            .cloned()
            .collect();
        unreached.sort();
        order.extend(unreached);

        order
    }

    /// The set of nodes reachable from the `start` node.
    ///
    /// Empty when the template has no `start` node. Shared by
    /// [`validate`](Self::validate)'s unreachable-node check.
    #[must_use]
    pub fn reachable_from_start(&self) -> FxHashSet<NodeId> {
        let mut visited: FxHashSet<NodeId> = FxHashSet::default();
        let mut queue: VecDeque<NodeId> = VecDeque::new();

        if let Some(start) = self.start_node() {
            visited.insert(start.id.clone());
            queue.push_back(start.id.clone());
        }

        while let Some(id) = queue.pop_front() {
            for edge in self.outgoing(&id) {
                if !self.contains(&edge.target) {
                    continue;
                }
                if visited.insert(edge.target.clone()) {
                    queue.push_back(edge.target.clone());
                }
            }
        }

        visited
    }
}
