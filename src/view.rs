//! Immutable view models returned by the query façade.
//!
//! These are the engine's only outputs: fully computed, serializable
//! snapshots a UI or API layer can render without touching the stores
//! again. A view is either returned whole or not at all; there is no
//! partially-computed variant.

use serde::Serialize;

use crate::classify::{NodeProgress, RunStatusView};
use crate::graph::Position;
use crate::progress::{DirectBucket, SubProcessGroup};
use crate::types::{NodeId, NodeType, RequestId, RunId, TemplateId};
use crate::warnings::DataQualityWarning;

/// One node of the workflow display, in linear order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeView {
    pub id: NodeId,
    pub node_type: NodeType,
    pub label: String,
    pub position: Position,
    pub progress: NodeProgress,
}

/// The full per-workflow progress display for one sub-process.
///
/// `nodes` is in the deterministic linear order produced by
/// [`Graph::linearize`](crate::graph::Graph::linearize), so callers can
/// cache row layouts against it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorkflowView {
    pub template_id: TemplateId,
    /// Display name of the template, for the view header.
    pub template_name: String,
    /// The run the statuses were derived from; `None` under
    /// [`RunStatusView::NoRun`].
    pub run_id: Option<RunId>,
    pub nodes: Vec<NodeView>,
    pub run_status: RunStatusView,
    pub completed_count: usize,
    pub total_count: usize,
    pub percent: u8,
    pub warnings: Vec<DataQualityWarning>,
}

/// Per-request progress rollup across all sub-processes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RequestProgressView {
    pub request_id: RequestId,
    pub groups: Vec<SubProcessGroup>,
    /// Tasks created directly on the request, outside any workflow.
    pub direct: DirectBucket,
    /// Completion across every task of the request, grouping ignored.
    pub global_percent: u8,
    pub warnings: Vec<DataQualityWarning>,
}
