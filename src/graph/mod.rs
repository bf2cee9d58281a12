//! Workflow graph model, validation, and deterministic linearization.
//!
//! The graph is the authored shape of a sub-process: typed nodes connected
//! by directed edges, loaded from a template store and held immutably for
//! the duration of one query. This module provides:
//!
//! - **Model**: [`WorkflowTemplate`], [`WorkflowNode`], [`WorkflowEdge`],
//!   the raw rows as authored
//! - **Construction**: [`Graph::from_parts`], adjacency indexed by source
//!   node, tolerant of malformed input
//! - **Validation**: [`Graph::validate`], non-fatal [`StructuralWarning`]s
//! - **Linearization**: [`Graph::linearize`], the deterministic, cycle-safe
//!   total ordering used for display
//!
//! # Examples
//!
//! ```rust
//! use flowlens::graph::{Graph, WorkflowEdge, WorkflowNode};
//! use flowlens::types::NodeType;
//!
//! let graph = Graph::from_parts(
//!     "tpl-onboarding",
//!     vec![
//!         WorkflowNode::new("start", NodeType::Start),
//!         WorkflowNode::new("collect", NodeType::Task).with_label("Collect documents"),
//!         WorkflowNode::new("verify", NodeType::Validation).with_label("Verify identity"),
//!         WorkflowNode::new("end", NodeType::End),
//!     ],
//!     vec![
//!         WorkflowEdge::new("e1", "start", "collect"),
//!         WorkflowEdge::new("e2", "collect", "verify"),
//!         WorkflowEdge::new("e3", "verify", "end"),
//!     ],
//! );
//!
//! assert!(graph.validate().is_empty());
//! assert_eq!(graph.linearize().len(), graph.node_count());
//! ```

mod build;
mod linearize;
mod model;
mod validation;

pub use build::Graph;
pub use model::{Position, WorkflowEdge, WorkflowNode, WorkflowTemplate};
pub use validation::StructuralWarning;
