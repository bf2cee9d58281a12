//! Shared fixtures for integration tests.

use chrono::{DateTime, TimeZone, Utc};
use flowlens::graph::{Graph, WorkflowEdge, WorkflowNode};
use flowlens::progress::Task;
use flowlens::run::WorkflowRun;
use flowlens::types::{LogAction, NodeType, RunStatus, TaskStatus};

pub fn node(id: &str, node_type: NodeType) -> WorkflowNode {
    WorkflowNode::new(id, node_type)
}

pub fn edge(id: &str, source: &str, target: &str) -> WorkflowEdge {
    WorkflowEdge::new(id, source, target)
}

/// Deterministic timestamps: `ts(0)`, `ts(1)`, … are one minute apart.
pub fn ts(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, minute, 0).unwrap()
}

/// start -> collect -> verify -> end
pub fn approval_nodes() -> Vec<WorkflowNode> {
    vec![
        node("start", NodeType::Start),
        node("collect", NodeType::Task).with_label("Collect documents"),
        node("verify", NodeType::Validation).with_label("Verify identity"),
        node("end", NodeType::End),
    ]
}

pub fn approval_edges() -> Vec<WorkflowEdge> {
    vec![
        edge("e1", "start", "collect"),
        edge("e2", "collect", "verify"),
        edge("e3", "verify", "end"),
    ]
}

pub fn approval_graph() -> Graph {
    Graph::from_parts("tpl-approval", approval_nodes(), approval_edges())
}

/// start -> fork -> {branch-a, branch-b} -> join -> end
pub fn forked_graph() -> Graph {
    Graph::from_parts(
        "tpl-forked",
        vec![
            node("start", NodeType::Start),
            node("fork", NodeType::Fork),
            node("branch-a", NodeType::Task),
            node("branch-b", NodeType::Notification),
            node("join", NodeType::Join),
            node("end", NodeType::End),
        ],
        vec![
            edge("e1", "start", "fork"),
            edge("e2", "fork", "branch-a"),
            edge("e3", "fork", "branch-b"),
            edge("e4", "branch-a", "join"),
            edge("e5", "branch-b", "join"),
            edge("e6", "join", "end"),
        ],
    )
}

/// A running run over the approval graph that has visited start and collect.
pub fn mid_approval_run() -> WorkflowRun {
    WorkflowRun::new("run-1", "tpl-approval", "req-1")
        .with_status(RunStatus::Running)
        .with_entry(ts(0), "start", LogAction::Started)
        .with_entry(ts(1), "collect", LogAction::TaskReached)
        .with_active("verify")
}

pub fn task(id: &str, status: TaskStatus) -> Task {
    Task::new(id, status).under_request("req-1")
}

pub fn sp_task(id: &str, sub_process: &str, status: TaskStatus) -> Task {
    task(id, status).from_sub_process(sub_process)
}
