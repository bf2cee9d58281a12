//! Run state classification: per-node display status from a run snapshot.
//!
//! Given a graph and an optional run, [`classify`] derives what a progress
//! display needs: every node bucketed as completed, current, or pending,
//! plus completion counts and an overall run status. The derivation reads
//! the snapshot once and never mutates it; a concurrently-appending
//! executor is simply reflected in the next query.
//!
//! Classification rules:
//!
//! - node in the run's active set → [`NodeProgress::Current`]
//! - node visited by the execution log (and not current) →
//!   [`NodeProgress::Completed`]
//! - otherwise → [`NodeProgress::Pending`]
//! - no run at all → every node pending, run status [`RunStatusView::NoRun`]
//!
//! Repeat visits never decrease a node's status, and log entries naming
//! nodes absent from the graph are ignored for classification but reported
//! as [`DataQualityWarning::UnknownLogNode`].

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::graph::Graph;
use crate::run::WorkflowRun;
use crate::types::{NodeId, RunStatus};
use crate::util::round_half_up_percent;
use crate::warnings::DataQualityWarning;

/// Display status of a single node within a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeProgress {
    /// The log has visited this node and it is no longer active.
    Completed,
    /// The node is in the run's active set.
    Current,
    /// Nothing has reached this node yet.
    #[default]
    Pending,
}

impl fmt::Display for NodeProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Completed => "completed",
            Self::Current => "current",
            Self::Pending => "pending",
        };
        write!(f, "{s}")
    }
}

/// Overall run status as surfaced to callers.
///
/// "No run has been created yet" is an expected state, common for freshly
/// configured sub-processes, and deliberately distinct from the persisted
/// [`RunStatus`] enum: a store can never record it, only the absence of a
/// row means it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatusView {
    /// No run exists for this template/request pair.
    NoRun,
    /// The persisted status of an existing run.
    Existing(RunStatus),
}

impl RunStatusView {
    #[must_use]
    pub fn is_no_run(&self) -> bool {
        matches!(self, Self::NoRun)
    }
}

impl fmt::Display for RunStatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRun => write!(f, "no_run"),
            Self::Existing(status) => write!(f, "{status}"),
        }
    }
}

/// The classifier's output: per-node statuses plus run-level rollups.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunProgress {
    /// Display status per graph node. Every graph node has an entry.
    pub statuses: FxHashMap<NodeId, NodeProgress>,
    pub run_status: RunStatusView,
    /// Count of nodes classified [`NodeProgress::Completed`].
    pub completed_count: usize,
    /// Total node count of the graph.
    pub total_count: usize,
    /// `completed_count / total_count`, round-half-up, 0 for empty graphs.
    pub percent: u8,
    pub warnings: Vec<DataQualityWarning>,
}

impl RunProgress {
    /// Status of one node; nodes outside the graph read as pending.
    #[must_use]
    pub fn status_of(&self, id: &NodeId) -> NodeProgress {
        self.statuses.get(id).copied().unwrap_or_default()
    }

    /// `true` once every node of a non-empty graph is completed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_count > 0 && self.completed_count == self.total_count
    }
}

/// Classifies every node of `graph` against an optional run snapshot.
///
/// `None` means no run was ever created for this template/request pair:
/// all nodes come back pending under [`RunStatusView::NoRun`], which is a
/// valid view, not an error.
///
/// # Examples
///
/// ```rust
/// use chrono::Utc;
/// use flowlens::classify::{classify, NodeProgress};
/// use flowlens::graph::{Graph, WorkflowEdge, WorkflowNode};
/// use flowlens::run::WorkflowRun;
/// use flowlens::types::{LogAction, NodeType, RunStatus};
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
/// let run = WorkflowRun::new("run", "tpl", "req")
///     .with_status(RunStatus::Running)
///     .with_entry(Utc::now(), "start", LogAction::Started)
///     .with_entry(Utc::now(), "a", LogAction::TaskReached);
///
/// let progress = classify(&graph, Some(&run));
/// assert_eq!(progress.status_of(&"a".into()), NodeProgress::Completed);
/// assert_eq!(progress.status_of(&"end".into()), NodeProgress::Pending);
/// assert_eq!(progress.percent, 67);
/// ```
#[must_use]
pub fn classify(graph: &Graph, run: Option<&WorkflowRun>) -> RunProgress {
    let total_count = graph.node_count();

    let Some(run) = run else {
        let statuses = graph
            .node_ids()
            .map(|id| (id.clone(), NodeProgress::Pending))
            .collect();
        return RunProgress {
            statuses,
            run_status: RunStatusView::NoRun,
            completed_count: 0,
            total_count,
            percent: 0,
            warnings: Vec::new(),
        };
    };

    let mut warnings = Vec::new();
    let mut reported: FxHashSet<&NodeId> = FxHashSet::default();
    // Walk the log in its canonical order so warning order is stable.
    for entry in run.sorted_log() {
        if !graph.contains(&entry.node) && reported.insert(&entry.node) {
            tracing::warn!(run = %run.id, node = %entry.node, "log entry references unknown node");
            warnings.push(DataQualityWarning::UnknownLogNode {
                node: entry.node.clone(),
            });
        }
    }

    let visited = run.visited_nodes();
    let mut statuses = FxHashMap::default();
    let mut completed_count = 0;
    for id in graph.node_ids() {
        let progress = if run.active_nodes.contains(id) {
            NodeProgress::Current
        } else if visited.contains(id) {
            completed_count += 1;
            NodeProgress::Completed
        } else {
            NodeProgress::Pending
        };
        statuses.insert(id.clone(), progress);
    }

    RunProgress {
        statuses,
        run_status: RunStatusView::Existing(run.status),
        completed_count,
        total_count,
        percent: round_half_up_percent(completed_count, total_count),
        warnings,
    }
}
