//! Core types for the flowlens progress engine.
//!
//! This module defines the identifier newtypes and the domain enums used
//! throughout the engine: node and template identity, run lifecycle status,
//! task status, and execution-log actions. These are the core concepts that
//! define what a workflow *is*; derived presentation types live in
//! [`crate::view`].
//!
//! # Key Types
//!
//! - [`NodeType`]: the kind of step a workflow node represents
//! - [`RunStatus`]: lifecycle status of a workflow run
//! - [`TaskStatus`]: status of a task in the surrounding task system
//! - [`LogAction`]: what an execution-log entry records
//!
//! # Examples
//!
//! ```rust
//! use flowlens::types::{LogAction, NodeId, NodeType, TaskStatus};
//!
//! let node: NodeId = "approve-request".into();
//! assert_eq!(node.as_str(), "approve-request");
//!
//! // Persistence round-trip for log actions
//! let action = LogAction::TaskReached;
//! assert_eq!(LogAction::decode(&action.encode()), action);
//!
//! // Only done/validated count as complete
//! assert!(TaskStatus::Validated.is_complete());
//! assert!(!TaskStatus::InProgress.is_complete());
//!
//! assert!(NodeType::Start.is_start());
//! ```
//!
//! ```rust
//! use flowlens::types::RunStatus;
//!
//! // Terminal runs have immutable logs.
//! assert!(RunStatus::Cancelled.is_terminal());
//! assert!(!RunStatus::Paused.is_terminal());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        // Developer Experience: allow string literals wherever an id is expected.
        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

id_type! {
    /// Identifies a workflow template (the authored graph).
    TemplateId
}
id_type! {
    /// Identifies a node within a workflow template.
    NodeId
}
id_type! {
    /// Identifies an edge within a workflow template.
    EdgeId
}
id_type! {
    /// Identifies one execution instance of a workflow template.
    RunId
}
id_type! {
    /// Identifies a top-level request (the entity that spawns tasks).
    RequestId
}
id_type! {
    /// Identifies a sub-process within a process template.
    SubProcessId
}
id_type! {
    /// Identifies a task in the surrounding task system.
    TaskId
}

/// The kind of step a workflow node represents.
///
/// Every node in a template carries exactly one `NodeType`. The engine only
/// attaches structural meaning to [`Start`](Self::Start) (the single BFS
/// root) and [`End`](Self::End) (terminal nodes that gate run completion);
/// the remaining kinds are carried through to views so callers can render
/// them distinctly.
///
/// # Examples
///
/// ```rust
/// use flowlens::types::NodeType;
///
/// assert!(NodeType::Start.is_start());
/// assert!(NodeType::End.is_end());
/// assert!(!NodeType::Condition.is_end());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// Entry point of the template. Exactly one per well-formed template.
    Start,
    /// Terminal node. A run is complete only once every `End` node is visited.
    End,
    /// A step that creates a task for a user.
    Task,
    /// A step that creates a validation request.
    Validation,
    /// A step that sends a notification.
    Notification,
    /// A branching step; outgoing edges carry source handles selecting the branch.
    Condition,
    /// A step that launches a nested sub-process.
    SubProcess,
    /// Splits execution into concurrent branches.
    Fork,
    /// Joins concurrent branches back together.
    Join,
    /// A step that changes the triggering entity's status.
    StatusChange,
    /// A step that assigns the triggering entity to a user or group.
    Assignment,
}

impl NodeType {
    /// Returns `true` for the [`Start`](Self::Start) kind.
    #[must_use]
    pub fn is_start(&self) -> bool {
        matches!(self, Self::Start)
    }

    /// Returns `true` for the [`End`](Self::End) kind.
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Task => "task",
            Self::Validation => "validation",
            Self::Notification => "notification",
            Self::Condition => "condition",
            Self::SubProcess => "sub_process",
            Self::Fork => "fork",
            Self::Join => "join",
            Self::StatusChange => "status_change",
            Self::Assignment => "assignment",
        };
        write!(f, "{s}")
    }
}

/// Lifecycle status of a workflow run, as persisted by the executor.
///
/// The engine never transitions a run; it only reads this field. The
/// "no run exists yet" state is deliberately *not* part of this enum;
/// see [`RunStatusView`](crate::classify::RunStatusView) for the sentinel
/// surfaced to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    NotStarted,
    Running,
    Paused,
    Completed,
    Failed,
    Cancelled,
}

impl RunStatus {
    /// Returns `true` once the run can no longer change: its log is immutable.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotStarted => "not_started",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// Status of a task in the surrounding task system.
///
/// The broader system distinguishes many states; for progress computation
/// only the binary partition of [`is_complete`](Self::is_complete) matters:
/// `Done` and `Validated` count as complete, everything else does not.
/// Unrecognized states arriving from the store are carried in
/// [`Other`](Self::Other) and count as incomplete.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    Validated,
    Refused,
    Cancelled,
    /// Forward-compatibility bucket for states this engine does not know.
    Other(String),
}

impl TaskStatus {
    /// Returns `true` when the task counts toward completed totals.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Done | Self::Validated)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Todo => write!(f, "todo"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Done => write!(f, "done"),
            Self::Validated => write!(f, "validated"),
            Self::Refused => write!(f, "refused"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// What an execution-log entry records.
///
/// The executor's log format is open-ended; known actions are modeled as
/// closed variants and anything else is preserved verbatim in
/// [`Other`](Self::Other). For classification the action is irrelevant
/// (any entry marks its node as visited), but views keep the raw action
/// for execution-history rendering.
///
/// # Persistence
///
/// Stores that persist actions as plain strings use
/// [`encode`](Self::encode)/[`decode`](Self::decode):
///
/// ```rust
/// use flowlens::types::LogAction;
///
/// assert_eq!(LogAction::Started.encode(), "started");
/// assert_eq!(LogAction::decode("validation_created"), LogAction::ValidationCreated);
///
/// // Unknown actions survive the round-trip untouched
/// assert_eq!(LogAction::decode("escalated"), LogAction::Other("escalated".into()));
/// assert_eq!(LogAction::Other("escalated".into()).encode(), "escalated");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogAction {
    Started,
    TaskReached,
    ValidationCreated,
    NotificationSent,
    Completed,
    /// Forward-compatibility bucket for actions this engine does not know.
    Other(String),
}

impl LogAction {
    /// Encode a `LogAction` into its persisted string form.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Started => "started".to_string(),
            Self::TaskReached => "task_reached".to_string(),
            Self::ValidationCreated => "validation_created".to_string(),
            Self::NotificationSent => "notification_sent".to_string(),
            Self::Completed => "completed".to_string(),
            Self::Other(s) => s.clone(),
        }
    }

    /// Decode a persisted string form back into a `LogAction`.
    ///
    /// Unrecognized strings become [`Other`](Self::Other), so new executor
    /// actions never fail to load.
    #[must_use]
    pub fn decode(s: &str) -> Self {
        match s {
            "started" => Self::Started,
            "task_reached" => Self::TaskReached,
            "validation_created" => Self::ValidationCreated,
            "notification_sent" => Self::NotificationSent,
            "completed" => Self::Completed,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}
