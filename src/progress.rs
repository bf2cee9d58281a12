//! Progress aggregation over a request's task hierarchy.
//!
//! A request spawns child tasks; some of them were created by a
//! sub-process's workflow, some directly. This module folds a task snapshot
//! into per-sub-process completion groups and a global percentage. Every
//! function here is a pure function of its inputs, with no caching and no
//! interior state, so callers own snapshot freshness and identical input
//! always yields identical output.
//!
//! Tasks without a sub-process are *not* grouped, but they are never
//! dropped either: they land in an explicit [`DirectBucket`] and still
//! count toward the request's global progress.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{RequestId, SubProcessId, TaskId, TaskStatus};
use crate::util::round_half_up_percent;
use crate::warnings::DataQualityWarning;

/// A task row as loaded from the task store.
///
/// Only the fields progress computation needs; the surrounding task system
/// carries far more. `request_id = None` means a top-level task;
/// `sub_process_id = None` means the task was created directly rather than
/// by any workflow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<RequestId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_process_id: Option<SubProcessId>,
    pub status: TaskStatus,
}

impl Task {
    #[must_use]
    pub fn new(id: impl Into<TaskId>, status: TaskStatus) -> Self {
        Self {
            id: id.into(),
            request_id: None,
            sub_process_id: None,
            status,
        }
    }

    #[must_use]
    pub fn under_request(mut self, request: impl Into<RequestId>) -> Self {
        self.request_id = Some(request.into());
        self
    }

    #[must_use]
    pub fn from_sub_process(mut self, sub_process: impl Into<SubProcessId>) -> Self {
        self.sub_process_id = Some(sub_process.into());
        self
    }
}

/// Derived status of a sub-process group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    /// No task in the group has been started.
    Pending,
    /// At least one task is in progress or finished.
    InProgress,
    /// Every task in a non-empty group is complete.
    Done,
}

impl fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        };
        write!(f, "{s}")
    }
}

/// Completion rollup for the tasks one sub-process produced.
///
/// Derived, never persisted. `name` and `department` start as fallbacks
/// (the raw sub-process id, no department) until
/// [`enrich_with_names`] attaches display labels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubProcessGroup {
    pub sub_process_id: SubProcessId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub task_ids: Vec<TaskId>,
    pub completed_count: usize,
    pub total_count: usize,
    pub percent: u8,
    pub status: GroupStatus,
}

/// Tasks created directly on the request, outside any workflow.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectBucket {
    pub task_ids: Vec<TaskId>,
    pub completed_count: usize,
    pub total_count: usize,
    pub percent: u8,
}

/// Output of [`group_by_sub_process`]: the grouped rollups plus the
/// direct bucket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedTasks {
    /// One group per distinct sub-process id, sorted by id.
    pub groups: Vec<SubProcessGroup>,
    pub direct: DirectBucket,
}

impl GroupedTasks {
    /// Total number of tasks across groups and the direct bucket.
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.groups.iter().map(|g| g.total_count).sum::<usize>() + self.direct.total_count
    }
}

fn group_status(tasks: &[&Task], completed: usize) -> GroupStatus {
    if !tasks.is_empty() && completed == tasks.len() {
        return GroupStatus::Done;
    }
    let any_moving = tasks
        .iter()
        .any(|t| matches!(t.status, TaskStatus::InProgress) || t.status.is_complete());
    if any_moving {
        GroupStatus::InProgress
    } else {
        GroupStatus::Pending
    }
}

/// Partitions tasks by originating sub-process and rolls up completion.
///
/// Groups come back sorted by sub-process id so repeated calls over the
/// same snapshot produce identical output. Tasks with no sub-process go to
/// the direct bucket.
///
/// # Examples
///
/// ```rust
/// use flowlens::progress::{group_by_sub_process, GroupStatus, Task};
/// use flowlens::types::TaskStatus;
///
/// let tasks = vec![
///     Task::new("t1", TaskStatus::Done).from_sub_process("sp-a"),
///     Task::new("t2", TaskStatus::Todo).from_sub_process("sp-a"),
///     Task::new("t3", TaskStatus::Done).from_sub_process("sp-b"),
/// ];
///
/// let grouped = group_by_sub_process(&tasks);
/// assert_eq!(grouped.groups.len(), 2);
/// assert_eq!(grouped.groups[0].percent, 50);
/// assert_eq!(grouped.groups[1].status, GroupStatus::Done);
/// ```
#[must_use]
pub fn group_by_sub_process(tasks: &[Task]) -> GroupedTasks {
    let mut by_sub_process: FxHashMap<&SubProcessId, Vec<&Task>> = FxHashMap::default();
    let mut direct: Vec<&Task> = Vec::new();

    for task in tasks {
        match &task.sub_process_id {
            Some(sp) => by_sub_process.entry(sp).or_default().push(task),
            None => direct.push(task),
        }
    }

    let mut keys: Vec<&SubProcessId> = by_sub_process.keys().copied().collect();
    keys.sort();

    let groups = keys
        .into_iter()
        .map(|sp| {
            let members = &by_sub_process[sp];
            let completed = members.iter().filter(|t| t.status.is_complete()).count();
            SubProcessGroup {
                sub_process_id: sp.clone(),
                name: sp.to_string(),
                department: None,
                task_ids: members.iter().map(|t| t.id.clone()).collect(),
                completed_count: completed,
                total_count: members.len(),
                percent: round_half_up_percent(completed, members.len()),
                status: group_status(members, completed),
            }
        })
        .collect();

    let direct_completed = direct.iter().filter(|t| t.status.is_complete()).count();
    GroupedTasks {
        groups,
        direct: DirectBucket {
            completed_count: direct_completed,
            total_count: direct.len(),
            percent: round_half_up_percent(direct_completed, direct.len()),
            task_ids: direct.iter().map(|t| t.id.clone()).collect(),
        },
    }
}

/// Completion percentage across the full task list, grouping ignored.
#[must_use]
pub fn global_progress(tasks: &[Task]) -> u8 {
    let completed = tasks.iter().filter(|t| t.status.is_complete()).count();
    round_half_up_percent(completed, tasks.len())
}

/// Attaches display names and department labels to grouped rollups.
///
/// A group whose sub-process id has no entry in `names` keeps its fallback
/// label (the raw id) and yields a
/// [`DataQualityWarning::UnknownSubProcess`]; it is never omitted from
/// the result.
#[must_use]
pub fn enrich_with_names(
    mut grouped: GroupedTasks,
    names: &FxHashMap<SubProcessId, String>,
    departments: &FxHashMap<SubProcessId, String>,
) -> (GroupedTasks, Vec<DataQualityWarning>) {
    let mut warnings = Vec::new();

    for group in &mut grouped.groups {
        match names.get(&group.sub_process_id) {
            Some(name) => group.name = name.clone(),
            None => {
                tracing::warn!(sub_process = %group.sub_process_id, "no display name for sub-process");
                warnings.push(DataQualityWarning::UnknownSubProcess {
                    sub_process: group.sub_process_id.clone(),
                });
            }
        }
        group.department = departments.get(&group.sub_process_id).cloned();
    }

    (grouped, warnings)
}
