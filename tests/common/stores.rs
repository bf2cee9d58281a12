//! In-memory store implementations for façade tests.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use flowlens::facade::WorkflowEngine;
use flowlens::graph::{WorkflowEdge, WorkflowNode, WorkflowTemplate};
use flowlens::progress::Task;
use flowlens::run::WorkflowRun;
use flowlens::stores::{LabelStore, RunStore, StoreError, TaskStore, TemplateStore};
use flowlens::types::{RequestId, RunId, SubProcessId, TemplateId};

#[derive(Default)]
pub struct MemoryTemplates {
    pub defaults: FxHashMap<SubProcessId, WorkflowTemplate>,
    pub nodes: FxHashMap<TemplateId, Vec<WorkflowNode>>,
    pub edges: FxHashMap<TemplateId, Vec<WorkflowEdge>>,
}

impl MemoryTemplates {
    pub fn with_template(
        mut self,
        sub_process: &str,
        template: &str,
        nodes: Vec<WorkflowNode>,
        edges: Vec<WorkflowEdge>,
    ) -> Self {
        self.defaults.insert(
            sub_process.into(),
            WorkflowTemplate::new(template, sub_process, template).as_default(),
        );
        self.nodes.insert(template.into(), nodes);
        self.edges.insert(template.into(), edges);
        self
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplates {
    async fn default_template(
        &self,
        sub_process: &SubProcessId,
    ) -> Result<Option<WorkflowTemplate>, StoreError> {
        Ok(self.defaults.get(sub_process).cloned())
    }

    async fn nodes(&self, template: &TemplateId) -> Result<Vec<WorkflowNode>, StoreError> {
        Ok(self.nodes.get(template).cloned().unwrap_or_default())
    }

    async fn edges(&self, template: &TemplateId) -> Result<Vec<WorkflowEdge>, StoreError> {
        Ok(self.edges.get(template).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct MemoryRuns {
    pub runs: Vec<WorkflowRun>,
}

impl MemoryRuns {
    pub fn with_run(mut self, run: WorkflowRun) -> Self {
        self.runs.push(run);
        self
    }
}

#[async_trait]
impl RunStore for MemoryRuns {
    async fn run(&self, run: &RunId) -> Result<Option<WorkflowRun>, StoreError> {
        Ok(self.runs.iter().find(|r| &r.id == run).cloned())
    }

    async fn latest_run(
        &self,
        request: &RequestId,
        template: &TemplateId,
    ) -> Result<Option<WorkflowRun>, StoreError> {
        Ok(self
            .runs
            .iter()
            .filter(|r| &r.request_id == request && &r.template_id == template)
            .next_back()
            .cloned())
    }
}

#[derive(Default)]
pub struct MemoryTasks {
    pub by_request: FxHashMap<RequestId, Vec<Task>>,
}

impl MemoryTasks {
    pub fn with_request(mut self, request: &str, tasks: Vec<Task>) -> Self {
        self.by_request.insert(request.into(), tasks);
        self
    }
}

#[async_trait]
impl TaskStore for MemoryTasks {
    async fn child_tasks(&self, request: &RequestId) -> Result<Option<Vec<Task>>, StoreError> {
        Ok(self.by_request.get(request).cloned())
    }
}

#[derive(Default)]
pub struct MemoryLabels {
    pub names: FxHashMap<SubProcessId, String>,
    pub departments: FxHashMap<SubProcessId, String>,
}

impl MemoryLabels {
    pub fn with_name(mut self, sub_process: &str, name: &str) -> Self {
        self.names.insert(sub_process.into(), name.to_string());
        self
    }

    pub fn with_department(mut self, sub_process: &str, department: &str) -> Self {
        self.departments
            .insert(sub_process.into(), department.to_string());
        self
    }
}

#[async_trait]
impl LabelStore for MemoryLabels {
    async fn sub_process_name(
        &self,
        sub_process: &SubProcessId,
    ) -> Result<Option<String>, StoreError> {
        Ok(self.names.get(sub_process).cloned())
    }

    async fn department(&self, sub_process: &SubProcessId) -> Result<Option<String>, StoreError> {
        Ok(self.departments.get(sub_process).cloned())
    }
}

/// A store that fails every call, for collaborator-failure tests.
pub struct BrokenStore;

#[async_trait]
impl TemplateStore for BrokenStore {
    async fn default_template(
        &self,
        _sub_process: &SubProcessId,
    ) -> Result<Option<WorkflowTemplate>, StoreError> {
        Err(StoreError::msg("connection refused"))
    }

    async fn nodes(&self, _template: &TemplateId) -> Result<Vec<WorkflowNode>, StoreError> {
        Err(StoreError::msg("connection refused"))
    }

    async fn edges(&self, _template: &TemplateId) -> Result<Vec<WorkflowEdge>, StoreError> {
        Err(StoreError::msg("connection refused"))
    }
}

#[async_trait]
impl TaskStore for BrokenStore {
    async fn child_tasks(&self, _request: &RequestId) -> Result<Option<Vec<Task>>, StoreError> {
        Err(StoreError::msg("connection refused"))
    }
}

/// Engine wired to the given in-memory stores, with working labels.
pub fn engine(
    templates: MemoryTemplates,
    runs: MemoryRuns,
    tasks: MemoryTasks,
    labels: MemoryLabels,
) -> WorkflowEngine {
    WorkflowEngine::new(
        Arc::new(templates),
        Arc::new(runs),
        Arc::new(tasks),
        Arc::new(labels),
    )
}
