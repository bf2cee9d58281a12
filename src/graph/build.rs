//! Graph construction from raw template parts.
//!
//! [`Graph::from_parts`] turns the node and edge rows a template store
//! returns into a queryable in-memory graph with outgoing adjacency indexed
//! by source node. Construction is pure and total: malformed input is
//! accepted, remembered, and later reported by
//! [`Graph::validate`](super::Graph::validate) rather than rejected.

use rustc_hash::FxHashMap;

use super::model::{WorkflowEdge, WorkflowNode};
use crate::types::{NodeId, TemplateId};

/// A validated, queryable representation of one workflow template.
///
/// Node iteration order is the order nodes were supplied in (first
/// occurrence wins on duplicate ids), and a node's outgoing edges keep the
/// persisted edge order. Nothing in this type iterates a hash map to
/// produce output, so every accessor is deterministic across calls.
///
/// # Examples
///
/// ```rust
/// use flowlens::graph::{Graph, WorkflowEdge, WorkflowNode};
/// use flowlens::types::NodeType;
///
/// let graph = Graph::from_parts(
///     "tpl-1",
///     vec![
///         WorkflowNode::new("start", NodeType::Start),
///         WorkflowNode::new("review", NodeType::Task),
///         WorkflowNode::new("end", NodeType::End),
///     ],
///     vec![
///         WorkflowEdge::new("e1", "start", "review"),
///         WorkflowEdge::new("e2", "review", "end"),
///     ],
/// );
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.outgoing(&"start".into()).count(), 1);
/// assert!(graph.validate().is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct Graph {
    template_id: TemplateId,
    nodes: FxHashMap<NodeId, WorkflowNode>,
    /// Acceptance order of node ids; the deterministic iteration order.
    order: Vec<NodeId>,
    /// All edges in persisted order, including ones with unknown endpoints.
    edges: Vec<WorkflowEdge>,
    /// Outgoing edge indices per source node, in persisted order.
    outgoing: FxHashMap<NodeId, Vec<usize>>,
    /// Node ids that appeared more than once in the input.
    duplicates: Vec<NodeId>,
}

impl Graph {
    /// Builds a graph from the raw parts a template store supplies.
    ///
    /// Duplicate node ids keep their first occurrence; later occurrences
    /// are dropped and surfaced through [`validate`](Self::validate).
    /// Edges referencing unknown nodes are kept (the raw edge list is part
    /// of the graph) but contribute nothing to adjacency for the missing
    /// endpoint.
    #[must_use]
    pub fn from_parts(
        template_id: impl Into<TemplateId>,
        node_rows: Vec<WorkflowNode>,
        edge_rows: Vec<WorkflowEdge>,
    ) -> Self {
        let template_id = template_id.into();
        let mut nodes = FxHashMap::default();
        let mut order = Vec::with_capacity(node_rows.len());
        let mut duplicates = Vec::new();

        for node in node_rows {
            if nodes.contains_key(&node.id) {
                tracing::warn!(template = %template_id, node = %node.id, "duplicate node id dropped");
                duplicates.push(node.id);
                continue;
            }
            order.push(node.id.clone());
            nodes.insert(node.id.clone(), node);
        }

        let mut outgoing: FxHashMap<NodeId, Vec<usize>> = FxHashMap::default();
        for (idx, edge) in edge_rows.iter().enumerate() {
            outgoing.entry(edge.source.clone()).or_default().push(idx);
        }

        Self {
            template_id,
            nodes,
            order,
            edges: edge_rows,
            outgoing,
            duplicates,
        }
    }

    #[must_use]
    pub fn template_id(&self) -> &TemplateId {
        &self.template_id
    }

    /// Number of distinct nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&WorkflowNode> {
        self.nodes.get(id)
    }

    /// Nodes in deterministic acceptance order.
    pub fn nodes(&self) -> impl Iterator<Item = &WorkflowNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Node ids in deterministic acceptance order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.order.iter()
    }

    /// All edges in persisted order.
    #[must_use]
    pub fn edges(&self) -> &[WorkflowEdge] {
        &self.edges
    }

    /// The single entry node, if the template has one.
    ///
    /// With multiple `start` nodes (a structural warning) the first in
    /// acceptance order wins, so traversal stays deterministic even on
    /// malformed templates.
    #[must_use]
    pub fn start_node(&self) -> Option<&WorkflowNode> {
        self.nodes().find(|n| n.node_type.is_start())
    }

    /// All `start` nodes, in acceptance order. Well-formed templates have
    /// exactly one.
    pub fn start_nodes(&self) -> impl Iterator<Item = &WorkflowNode> {
        self.nodes().filter(|n| n.node_type.is_start())
    }

    /// All terminal (`end`) nodes, in acceptance order.
    pub fn end_nodes(&self) -> impl Iterator<Item = &WorkflowNode> {
        self.nodes().filter(|n| n.node_type.is_end())
    }

    /// Outgoing edges of `id` in persisted order.
    pub fn outgoing(&self, id: &NodeId) -> impl Iterator<Item = &WorkflowEdge> {
        self.outgoing
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&idx| &self.edges[idx])
    }

    /// Node ids that appeared more than once in the input rows.
    #[must_use]
    pub(super) fn duplicate_node_ids(&self) -> &[NodeId] {
        &self.duplicates
    }
}
