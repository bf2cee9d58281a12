//! Store seams: the read-only collaborators the engine composes.
//!
//! The engine owns no data. Templates, runs, tasks, and display labels all
//! live behind these async traits, implemented by the surrounding
//! application over whatever persistence it uses. Every method is a
//! point-in-time read; cancellation and timeouts are the caller's concern
//! and propagate through the `.await` points.
//!
//! Implementations signal *transport* failure with [`StoreError`]. "No such
//! row" is not a failure; it is `Ok(None)`, and the façade decides whether
//! absence is an error ([`RunStore::run`] with an explicitly requested id)
//! or an expected state ([`TemplateStore::default_template`]).

use async_trait::async_trait;
use std::error::Error;
use thiserror::Error;

use crate::graph::{WorkflowEdge, WorkflowNode, WorkflowTemplate};
use crate::progress::Task;
use crate::run::WorkflowRun;
use crate::types::{RequestId, RunId, SubProcessId, TemplateId};

/// A transport or storage failure raised by a collaborator.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl StoreError {
    #[must_use]
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Read access to authored workflow templates.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// The default template configured for a sub-process, if any.
    ///
    /// `Ok(None)` is the common "sub-process has no workflow" state, not a
    /// failure.
    async fn default_template(
        &self,
        sub_process: &SubProcessId,
    ) -> Result<Option<WorkflowTemplate>, StoreError>;

    /// All node rows of a template.
    async fn nodes(&self, template: &TemplateId) -> Result<Vec<WorkflowNode>, StoreError>;

    /// All edge rows of a template, in persisted order.
    async fn edges(&self, template: &TemplateId) -> Result<Vec<WorkflowEdge>, StoreError>;
}

/// Read access to workflow runs.
#[async_trait]
pub trait RunStore: Send + Sync {
    /// A run by id. `Ok(None)` means the id is unknown.
    async fn run(&self, run: &RunId) -> Result<Option<WorkflowRun>, StoreError>;

    /// Fallback lookup when no run id is known up front: the most recent
    /// run of `template` triggered by `request`, if one exists.
    async fn latest_run(
        &self,
        request: &RequestId,
        template: &TemplateId,
    ) -> Result<Option<WorkflowRun>, StoreError>;
}

/// Read access to a request's child tasks.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Child tasks of a request.
    ///
    /// `Ok(None)` means the request id itself is unknown;
    /// `Ok(Some(vec![]))` is a known request with no tasks yet.
    async fn child_tasks(&self, request: &RequestId) -> Result<Option<Vec<Task>>, StoreError>;
}

/// Resolution of sub-process ids to display labels.
///
/// Misses are tolerated everywhere: a `None` becomes a fallback label in
/// the view, never an error.
#[async_trait]
pub trait LabelStore: Send + Sync {
    async fn sub_process_name(
        &self,
        sub_process: &SubProcessId,
    ) -> Result<Option<String>, StoreError>;

    async fn department(&self, sub_process: &SubProcessId) -> Result<Option<String>, StoreError>;
}
