//! The query façade: the engine's only externally-facing API.
//!
//! [`WorkflowEngine`] composes the graph model, classifier, linearizer,
//! and aggregator over the store seams into two read operations:
//!
//! - [`workflow_view`](WorkflowEngine::workflow_view): the per-sub-process
//!   step display
//! - [`request_progress`](WorkflowEngine::request_progress): the
//!   per-request completion rollup
//!
//! Each call loads a fresh snapshot, computes, and returns an immutable
//! view; no state survives between calls, so any number of queries may run
//! concurrently with no coordination. Either a whole view is returned or
//! an error, never a half-computed result.

use std::sync::Arc;

use miette::Diagnostic;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::classify::classify;
use crate::graph::Graph;
use crate::progress::{enrich_with_names, global_progress, group_by_sub_process};
use crate::run::WorkflowRun;
use crate::stores::{LabelStore, RunStore, StoreError, TaskStore, TemplateStore};
use crate::types::{RequestId, RunId, SubProcessId};
use crate::view::{NodeView, RequestProgressView, WorkflowView};
use crate::warnings::DataQualityWarning;

/// Terminal failures of a façade query.
///
/// Data-quality problems never appear here; they degrade gracefully into
/// the view's warning list. Only missing required inputs and collaborator
/// transport failures are terminal.
#[derive(Debug, Error, Diagnostic)]
pub enum QueryError {
    /// No default workflow template exists for the sub-process.
    ///
    /// Expected and common: most sub-processes never get a workflow.
    /// Callers render an explicit unconfigured/empty state.
    #[error("no default workflow template for sub-process {sub_process}")]
    #[diagnostic(
        code(flowlens::facade::not_configured),
        help("Not a system error: render the unconfigured empty state.")
    )]
    NotConfigured { sub_process: SubProcessId },

    /// A run id was explicitly requested and does not exist.
    #[error("workflow run {run} not found")]
    #[diagnostic(code(flowlens::facade::run_not_found))]
    RunNotFound { run: RunId },

    /// The request id itself does not exist.
    #[error("request {request} not found")]
    #[diagnostic(code(flowlens::facade::request_not_found))]
    RequestNotFound { request: RequestId },

    /// A collaborator failed; the failure is propagated unchanged, tagged
    /// with which store raised it so callers can tell "no data" from
    /// "couldn't fetch data".
    #[error("{store} store failed")]
    #[diagnostic(
        code(flowlens::facade::store),
        help("Transient storage/transport failure; retry is the caller's call.")
    )]
    Store {
        store: &'static str,
        #[source]
        source: StoreError,
    },
}

fn store_err(store: &'static str) -> impl FnOnce(StoreError) -> QueryError {
    move |source| QueryError::Store { store, source }
}

/// The externally-facing query engine.
///
/// Holds only `Arc`s to its collaborators; cloning is cheap and the engine
/// is `Send + Sync`, so one instance can serve arbitrarily many concurrent
/// queries.
#[derive(Clone)]
pub struct WorkflowEngine {
    templates: Arc<dyn TemplateStore>,
    runs: Arc<dyn RunStore>,
    tasks: Arc<dyn TaskStore>,
    labels: Arc<dyn LabelStore>,
}

impl WorkflowEngine {
    #[must_use]
    pub fn new(
        templates: Arc<dyn TemplateStore>,
        runs: Arc<dyn RunStore>,
        tasks: Arc<dyn TaskStore>,
        labels: Arc<dyn LabelStore>,
    ) -> Self {
        Self {
            templates,
            runs,
            tasks,
            labels,
        }
    }

    /// Computes the workflow step display for one sub-process of a request.
    ///
    /// Resolves the sub-process's default template
    /// ([`QueryError::NotConfigured`] when none exists), loads the graph,
    /// loads the run (by explicit id when given, failing with
    /// [`QueryError::RunNotFound`] if that id is unknown; otherwise the
    /// latest run for the request), classifies every node, and returns
    /// the nodes in deterministic linear order.
    ///
    /// A missing run under the fallback lookup is not an error: the view
    /// comes back with every node pending and
    /// [`RunStatusView::NoRun`](crate::classify::RunStatusView::NoRun).
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn workflow_view(
        &self,
        sub_process: &SubProcessId,
        request: &RequestId,
        run_id: Option<&RunId>,
    ) -> Result<WorkflowView, QueryError> {
        let template = self
            .templates
            .default_template(sub_process)
            .await
            .map_err(store_err("template"))?
            .ok_or_else(|| QueryError::NotConfigured {
                sub_process: sub_process.clone(),
            })?;
        let template_id = template.id.clone();

        let (node_rows, edge_rows) = tokio::try_join!(
            self.templates.nodes(&template_id),
            self.templates.edges(&template_id),
        )
        .map_err(store_err("template"))?;

        let graph = Graph::from_parts(template_id.clone(), node_rows, edge_rows);
        let mut warnings: Vec<DataQualityWarning> =
            graph.validate().into_iter().map(Into::into).collect();

        let run: Option<WorkflowRun> = match run_id {
            Some(id) => {
                let run = self
                    .runs
                    .run(id)
                    .await
                    .map_err(store_err("run"))?
                    .ok_or_else(|| QueryError::RunNotFound { run: id.clone() })?;
                Some(run)
            }
            None => self
                .runs
                .latest_run(request, &template_id)
                .await
                .map_err(store_err("run"))?,
        };

        let progress = classify(&graph, run.as_ref());
        warnings.extend(progress.warnings.iter().cloned());

        let nodes: Vec<NodeView> = graph
            .linearize()
            .into_iter()
            .filter_map(|id| {
                let node = graph.node(&id)?;
                Some(NodeView {
                    progress: progress.status_of(&id),
                    id,
                    node_type: node.node_type,
                    label: node.label.clone(),
                    position: node.position,
                })
            })
            .collect();

        Ok(WorkflowView {
            template_id,
            template_name: template.name,
            run_id: run.map(|r| r.id),
            nodes,
            run_status: progress.run_status,
            completed_count: progress.completed_count,
            total_count: progress.total_count,
            percent: progress.percent,
            warnings,
        })
    }

    /// Computes the per-request completion rollup.
    ///
    /// Fails with [`QueryError::RequestNotFound`] only when the request id
    /// itself is unknown; a known request with no tasks yields a valid
    /// empty view (no groups, empty direct bucket, 0%).
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn request_progress(
        &self,
        request: &RequestId,
    ) -> Result<RequestProgressView, QueryError> {
        let tasks = self
            .tasks
            .child_tasks(request)
            .await
            .map_err(store_err("task"))?
            .ok_or_else(|| QueryError::RequestNotFound {
                request: request.clone(),
            })?;

        let grouped = group_by_sub_process(&tasks);
        let global_percent = global_progress(&tasks);

        let mut names: FxHashMap<SubProcessId, String> = FxHashMap::default();
        let mut departments: FxHashMap<SubProcessId, String> = FxHashMap::default();
        for group in &grouped.groups {
            let sp = &group.sub_process_id;
            if let Some(name) = self
                .labels
                .sub_process_name(sp)
                .await
                .map_err(store_err("label"))?
            {
                names.insert(sp.clone(), name);
            }
            if let Some(dept) = self
                .labels
                .department(sp)
                .await
                .map_err(store_err("label"))?
            {
                departments.insert(sp.clone(), dept);
            }
        }

        let (grouped, warnings) = enrich_with_names(grouped, &names, &departments);

        Ok(RequestProgressView {
            request_id: request.clone(),
            groups: grouped.groups,
            direct: grouped.direct,
            global_percent,
            warnings,
        })
    }
}
