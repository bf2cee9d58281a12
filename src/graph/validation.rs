//! Structural validation for workflow graphs.
//!
//! Validation is non-fatal by design: a template that fails any of these
//! checks still classifies, linearizes, and renders. The warnings are
//! collected into the returned view so callers can surface data-quality
//! problems without losing the progress display.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Graph;
use crate::types::{EdgeId, NodeId};

/// A non-fatal structural defect found in a workflow template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralWarning {
    /// No node of type `start` exists; traversal has no root.
    MissingStart,
    /// More than one `start` node; the first in acceptance order is used.
    MultipleStart { count: usize },
    /// A node id appeared more than once; the first occurrence was kept.
    DuplicateNode { node: NodeId },
    /// An edge's source references a node id not present in the template.
    UnknownEdgeSource { edge: EdgeId, node: NodeId },
    /// An edge's target references a node id not present in the template.
    UnknownEdgeTarget { edge: EdgeId, node: NodeId },
    /// A node no path from `start` reaches.
    Unreachable { node: NodeId },
}

impl fmt::Display for StructuralWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => write!(f, "template has no start node"),
            Self::MultipleStart { count } => {
                write!(f, "template has {count} start nodes, expected exactly one")
            }
            Self::DuplicateNode { node } => write!(f, "duplicate node id {node}"),
            Self::UnknownEdgeSource { edge, node } => {
                write!(f, "edge {edge} sources unknown node {node}")
            }
            Self::UnknownEdgeTarget { edge, node } => {
                write!(f, "edge {edge} targets unknown node {node}")
            }
            Self::Unreachable { node } => write!(f, "node {node} is unreachable from start"),
        }
    }
}

/// Structural validation for [`Graph`].
impl Graph {
    /// Checks the structural invariants of the template and returns every
    /// violation found.
    ///
    /// An empty result means the template is well-formed. A non-empty
    /// result degrades nothing: the graph stays fully usable and every
    /// other operation behaves deterministically around the defects.
    #[must_use]
    pub fn validate(&self) -> Vec<StructuralWarning> {
        let mut warnings = Vec::new();

        for node in self.duplicate_node_ids() {
            warnings.push(StructuralWarning::DuplicateNode { node: node.clone() });
        }

        let start_count = self.start_nodes().count();
        match start_count {
            0 if !self.is_empty() => warnings.push(StructuralWarning::MissingStart),
            0 | 1 => {}
            count => warnings.push(StructuralWarning::MultipleStart { count }),
        }

        for edge in self.edges() {
            if !self.contains(&edge.source) {
                warnings.push(StructuralWarning::UnknownEdgeSource {
                    edge: edge.id.clone(),
                    node: edge.source.clone(),
                });
            }
            if !self.contains(&edge.target) {
                warnings.push(StructuralWarning::UnknownEdgeTarget {
                    edge: edge.id.clone(),
                    node: edge.target.clone(),
                });
            }
        }

        if start_count > 0 {
            let reachable = self.reachable_from_start();
            for id in self.node_ids() {
                if !reachable.contains(id) {
                    warnings.push(StructuralWarning::Unreachable { node: id.clone() });
                }
            }
        }

        if !warnings.is_empty() {
            tracing::warn!(
                template = %self.template_id(),
                count = warnings.len(),
                "template has structural warnings"
            );
        }

        warnings
    }
}
