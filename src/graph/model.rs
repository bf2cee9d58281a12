//! Authored workflow entities: templates, nodes, and edges.
//!
//! These are the raw parts a template store hands to
//! [`Graph::from_parts`](super::Graph::from_parts). They are authored once
//! in the (external) template editor and treated as immutable here.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{EdgeId, NodeId, NodeType, SubProcessId, TemplateId};

/// An authored workflow template: identity and ownership metadata.
///
/// The graph structure itself (nodes and edges) is loaded separately; a
/// template row only says which sub-process owns the graph and whether it
/// is that sub-process's default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    pub id: TemplateId,
    pub sub_process_id: SubProcessId,
    pub name: String,
    pub is_default: bool,
}

impl WorkflowTemplate {
    #[must_use]
    pub fn new(
        id: impl Into<TemplateId>,
        sub_process_id: impl Into<SubProcessId>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sub_process_id: sub_process_id.into(),
            name: name.into(),
            is_default: false,
        }
    }

    /// Marks this template as the default for its sub-process.
    #[must_use]
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// Display position of a node on the authoring canvas.
///
/// Carried through untouched; the engine never interprets coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One node of a workflow template.
///
/// The `config` map is opaque to the engine: condition expressions,
/// notification targets, and similar executor concerns live there and are
/// carried untouched.
///
/// # Examples
///
/// ```rust
/// use flowlens::graph::{Position, WorkflowNode};
/// use flowlens::types::NodeType;
///
/// let node = WorkflowNode::new("n1", NodeType::Task)
///     .with_label("Review documents")
///     .with_position(Position::new(120.0, 40.0));
/// assert_eq!(node.label, "Review documents");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: NodeId,
    pub node_type: NodeType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub config: FxHashMap<String, Value>,
}

impl WorkflowNode {
    #[must_use]
    pub fn new(id: impl Into<NodeId>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            node_type,
            label: String::new(),
            position: Position::default(),
            config: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: Value) -> Self {
        self.config.insert(key.into(), value);
        self
    }
}

/// One directed edge of a workflow template.
///
/// Handles are branch selectors: a `condition` or `fork` node's outgoing
/// edges carry a `source_handle` naming the branch they leave from. The
/// engine preserves handles for rendering but attaches no routing meaning
/// to them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl WorkflowEdge {
    #[must_use]
    pub fn new(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    #[must_use]
    pub fn with_source_handle(mut self, handle: impl Into<String>) -> Self {
        self.source_handle = Some(handle.into());
        self
    }

    #[must_use]
    pub fn with_target_handle(mut self, handle: impl Into<String>) -> Self {
        self.target_handle = Some(handle.into());
        self
    }
}
