//! # flowlens: Workflow Progress & Graph Traversal Engine
//!
//! flowlens derives live progress views for a business task/request
//! tracker: workflow templates are directed graphs of typed nodes, runs
//! leave an append-only execution log, and requests spawn task hierarchies
//! grouped by the sub-process that produced them. The engine is a pure,
//! read-mostly computation over snapshots supplied by store collaborators;
//! it never executes a workflow and never mutates an entity.
//!
//! ## Core Concepts
//!
//! - **Graph**: validated, queryable shape of one workflow template
//! - **Classification**: per-node completed/current/pending status derived
//!   from a run's execution log and active-node set
//! - **Linearization**: deterministic, cycle-safe total ordering of nodes
//!   for stable display
//! - **Aggregation**: per-sub-process and global completion rollups over a
//!   request's tasks
//! - **Façade**: [`WorkflowEngine`](facade::WorkflowEngine) composing the
//!   above into two async read operations
//!
//! ## Quick Start
//!
//! The algorithmic layers are plain synchronous functions and usable
//! without the façade:
//!
//! ```rust
//! use chrono::Utc;
//! use flowlens::classify::{classify, NodeProgress};
//! use flowlens::graph::{Graph, WorkflowEdge, WorkflowNode};
//! use flowlens::run::WorkflowRun;
//! use flowlens::types::{LogAction, NodeType, RunStatus};
//!
//! let graph = Graph::from_parts(
//!     "tpl-approval",
//!     vec![
//!         WorkflowNode::new("start", NodeType::Start),
//!         WorkflowNode::new("review", NodeType::Task).with_label("Review"),
//!         WorkflowNode::new("end", NodeType::End),
//!     ],
//!     vec![
//!         WorkflowEdge::new("e1", "start", "review"),
//!         WorkflowEdge::new("e2", "review", "end"),
//!     ],
//! );
//!
//! let run = WorkflowRun::new("run-7", "tpl-approval", "req-42")
//!     .with_status(RunStatus::Running)
//!     .with_entry(Utc::now(), "start", LogAction::Started)
//!     .with_entry(Utc::now(), "review", LogAction::TaskReached)
//!     .with_active("review");
//!
//! let progress = classify(&graph, Some(&run));
//! assert_eq!(progress.status_of(&"start".into()), NodeProgress::Completed);
//! assert_eq!(progress.status_of(&"review".into()), NodeProgress::Current);
//!
//! // Stable display order, total over all nodes, cycle-safe.
//! let order = graph.linearize();
//! assert_eq!(order.len(), graph.node_count());
//! ```
//!
//! The façade wires the same computation to async store collaborators and
//! returns immutable [`WorkflowView`](view::WorkflowView) /
//! [`RequestProgressView`](view::RequestProgressView) values; see
//! [`facade`] for the error taxonomy.
//!
//! ## Degradation Contract
//!
//! Structural defects (missing start node, dangling edges, unreachable
//! nodes) and data-quality problems (log entries naming unknown nodes,
//! unresolvable sub-process labels) never fail a query. The engine returns
//! the best available view plus a
//! [`DataQualityWarning`](warnings::DataQualityWarning) list; only missing
//! required inputs and collaborator transport failures are terminal.
//!
//! ## Module Guide
//!
//! - [`types`] - Identifier newtypes and core domain enums
//! - [`graph`] - Template model, construction, validation, linearization
//! - [`run`] - Run snapshots and the append-only execution log
//! - [`classify`] - Per-node status derivation
//! - [`progress`] - Task grouping and completion aggregation
//! - [`stores`] - Async collaborator seams
//! - [`view`] - Immutable view models
//! - [`facade`] - The externally-facing query engine

pub mod classify;
pub mod facade;
pub mod graph;
pub mod progress;
pub mod run;
pub mod stores;
pub mod types;
pub mod util;
pub mod view;
pub mod warnings;
