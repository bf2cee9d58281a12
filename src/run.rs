//! Run snapshots and the append-only execution log.
//!
//! A [`WorkflowRun`] is one execution instance of a template for a specific
//! request, as loaded from a run store. The engine treats the snapshot as
//! immutable input; the mutating helpers here exist for executors and test
//! fixtures building runs in memory.
//!
//! The run carries a *set* of currently-active node ids rather than a
//! single pointer: `fork`/`join` templates legitimately have several
//! branches active at once.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::types::{LogAction, NodeId, RequestId, RunId, RunStatus, TemplateId};

/// One entry of a run's execution log.
///
/// Entries are append-only and ordered by timestamp, with log position
/// breaking ties. For classification only the node id matters (any entry
/// marks its node as visited); the action and timestamp are preserved
/// for execution-history rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionLogEntry {
    pub at: DateTime<Utc>,
    pub node: NodeId,
    pub action: LogAction,
}

impl ExecutionLogEntry {
    #[must_use]
    pub fn new(at: DateTime<Utc>, node: impl Into<NodeId>, action: LogAction) -> Self {
        Self {
            at,
            node: node.into(),
            action,
        }
    }
}

/// One execution instance of a workflow template for a specific request.
///
/// # Examples
///
/// ```rust
/// use chrono::Utc;
/// use flowlens::run::WorkflowRun;
/// use flowlens::types::{LogAction, RunStatus};
///
/// let run = WorkflowRun::new("run-1", "tpl-1", "req-1")
///     .with_status(RunStatus::Running)
///     .with_entry(Utc::now(), "start", LogAction::Started)
///     .with_entry(Utc::now(), "review", LogAction::TaskReached)
///     .with_active("review");
///
/// assert_eq!(run.log.len(), 2);
/// assert!(run.visited_nodes().contains(&"start".into()));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub id: RunId,
    pub template_id: TemplateId,
    pub request_id: RequestId,
    pub status: RunStatus,
    /// Currently-active node ids. Several entries while fork branches run.
    #[serde(default)]
    pub active_nodes: FxHashSet<NodeId>,
    /// Append-only execution log in append order.
    #[serde(default)]
    pub log: Vec<ExecutionLogEntry>,
}

impl WorkflowRun {
    #[must_use]
    pub fn new(
        id: impl Into<RunId>,
        template_id: impl Into<TemplateId>,
        request_id: impl Into<RequestId>,
    ) -> Self {
        Self {
            id: id.into(),
            template_id: template_id.into(),
            request_id: request_id.into(),
            status: RunStatus::NotStarted,
            active_nodes: FxHashSet::default(),
            log: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: RunStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_active(mut self, node: impl Into<NodeId>) -> Self {
        self.active_nodes.insert(node.into());
        self
    }

    #[must_use]
    pub fn with_entry(
        mut self,
        at: DateTime<Utc>,
        node: impl Into<NodeId>,
        action: LogAction,
    ) -> Self {
        self.record(at, node, action);
        self
    }

    /// Appends a log entry.
    ///
    /// Construction aid for executors and fixtures; the engine itself never
    /// mutates a loaded run.
    pub fn record(&mut self, at: DateTime<Utc>, node: impl Into<NodeId>, action: LogAction) {
        self.log.push(ExecutionLogEntry::new(at, node, action));
    }

    /// Log entries ordered by timestamp, log position breaking ties.
    ///
    /// Stores are expected to hand back the log in append order with
    /// non-decreasing timestamps; sorting once per query makes the
    /// classification independent of that expectation.
    #[must_use]
    pub fn sorted_log(&self) -> Vec<&ExecutionLogEntry> {
        let mut entries: Vec<&ExecutionLogEntry> = self.log.iter().collect();
        // Stable sort: entries with equal timestamps keep log position.
        entries.sort_by_key(|e| e.at);
        entries
    }

    /// The set of node ids the log has visited.
    #[must_use]
    pub fn visited_nodes(&self) -> FxHashSet<NodeId> {
        self.log.iter().map(|e| e.node.clone()).collect()
    }
}
