mod common;

use std::sync::Arc;

use common::*;
use flowlens::classify::{NodeProgress, RunStatusView};
use flowlens::facade::{QueryError, WorkflowEngine};
use flowlens::run::WorkflowRun;
use flowlens::types::{LogAction, RunStatus, TaskStatus};
use flowlens::warnings::DataQualityWarning;

fn approval_engine(runs: MemoryRuns) -> WorkflowEngine {
    engine(
        MemoryTemplates::default().with_template(
            "sp-approval",
            "tpl-approval",
            approval_nodes(),
            approval_edges(),
        ),
        runs,
        MemoryTasks::default(),
        MemoryLabels::default(),
    )
}

#[tokio::test]
async fn workflow_view_happy_path() {
    let engine = approval_engine(MemoryRuns::default().with_run(mid_approval_run()));

    let view = engine
        .workflow_view(&"sp-approval".into(), &"req-1".into(), Some(&"run-1".into()))
        .await
        .unwrap();

    assert_eq!(view.template_id, "tpl-approval".into());
    assert_eq!(view.template_name, "tpl-approval");
    assert_eq!(view.run_id, Some("run-1".into()));
    assert_eq!(view.run_status, RunStatusView::Existing(RunStatus::Running));

    // Nodes come back in linear order with their statuses attached.
    let rendered: Vec<(&str, NodeProgress)> = view
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.progress))
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("start", NodeProgress::Completed),
            ("collect", NodeProgress::Completed),
            ("verify", NodeProgress::Current),
            ("end", NodeProgress::Pending),
        ]
    );

    assert_eq!(view.completed_count, 2);
    assert_eq!(view.total_count, 4);
    assert_eq!(view.percent, 50);
    assert!(view.warnings.is_empty());
}

#[tokio::test]
async fn workflow_view_falls_back_to_latest_run() {
    let older = WorkflowRun::new("run-old", "tpl-approval", "req-1")
        .with_status(RunStatus::Completed)
        .with_entry(ts(0), "start", LogAction::Started);
    let newer = mid_approval_run();
    let engine = approval_engine(MemoryRuns::default().with_run(older).with_run(newer));

    let view = engine
        .workflow_view(&"sp-approval".into(), &"req-1".into(), None)
        .await
        .unwrap();

    assert_eq!(view.run_id, Some("run-1".into()));
    assert_eq!(view.run_status, RunStatusView::Existing(RunStatus::Running));
}

#[tokio::test]
async fn workflow_view_without_any_run_reports_no_run() {
    let engine = approval_engine(MemoryRuns::default());

    let view = engine
        .workflow_view(&"sp-approval".into(), &"req-1".into(), None)
        .await
        .unwrap();

    assert_eq!(view.run_status, RunStatusView::NoRun);
    assert_eq!(view.run_id, None);
    assert_eq!(view.percent, 0);
    assert!(view.nodes.iter().all(|n| n.progress == NodeProgress::Pending));
}

#[tokio::test]
async fn unconfigured_sub_process_is_an_explicit_state() {
    let engine = approval_engine(MemoryRuns::default());

    let err = engine
        .workflow_view(&"sp-without-workflow".into(), &"req-1".into(), None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        QueryError::NotConfigured { sub_process } if sub_process == "sp-without-workflow".into()
    ));
}

#[tokio::test]
async fn explicitly_requested_run_must_exist() {
    let engine = approval_engine(MemoryRuns::default());

    let err = engine
        .workflow_view(&"sp-approval".into(), &"req-1".into(), Some(&"run-gone".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, QueryError::RunNotFound { run } if run == "run-gone".into()));
}

#[tokio::test]
async fn structural_and_log_warnings_reach_the_view() {
    let mut nodes = approval_nodes();
    nodes.push(node("island", flowlens::types::NodeType::Task));
    let run = mid_approval_run().with_entry(ts(2), "deleted-step", LogAction::Completed);

    let engine = engine(
        MemoryTemplates::default().with_template(
            "sp-approval",
            "tpl-approval",
            nodes,
            approval_edges(),
        ),
        MemoryRuns::default().with_run(run),
        MemoryTasks::default(),
        MemoryLabels::default(),
    );

    let view = engine
        .workflow_view(&"sp-approval".into(), &"req-1".into(), None)
        .await
        .unwrap();

    // Degraded, not failed: the view is complete and the problems are listed.
    assert_eq!(view.nodes.len(), 5);
    assert!(view.warnings.iter().any(|w| matches!(
        w,
        DataQualityWarning::Structural { .. }
    )));
    assert!(view.warnings.iter().any(|w| matches!(
        w,
        DataQualityWarning::UnknownLogNode { node } if node == &"deleted-step".into()
    )));
}

#[tokio::test]
async fn request_progress_rolls_up_groups_and_direct_tasks() {
    let engine = engine(
        MemoryTemplates::default(),
        MemoryRuns::default(),
        MemoryTasks::default().with_request(
            "req-1",
            vec![
                sp_task("t1", "sp-a", TaskStatus::Done),
                sp_task("t2", "sp-a", TaskStatus::Todo),
                sp_task("t3", "sp-b", TaskStatus::Done),
                task("t4", TaskStatus::InProgress),
            ],
        ),
        MemoryLabels::default()
            .with_name("sp-a", "Account opening")
            .with_department("sp-a", "Compliance")
            .with_name("sp-b", "Risk check"),
    );

    let view = engine.request_progress(&"req-1".into()).await.unwrap();

    assert_eq!(view.groups.len(), 2);
    assert_eq!(view.groups[0].name, "Account opening");
    assert_eq!(view.groups[0].department.as_deref(), Some("Compliance"));
    assert_eq!(view.groups[0].percent, 50);
    assert_eq!(view.groups[1].name, "Risk check");
    assert_eq!(view.groups[1].percent, 100);
    assert_eq!(view.direct.total_count, 1);
    // 2 of 4 tasks complete across the request.
    assert_eq!(view.global_percent, 50);
    assert!(view.warnings.is_empty());
}

#[tokio::test]
async fn request_progress_unknown_request_is_not_found() {
    let engine = engine(
        MemoryTemplates::default(),
        MemoryRuns::default(),
        MemoryTasks::default(),
        MemoryLabels::default(),
    );

    let err = engine.request_progress(&"req-ghost".into()).await.unwrap_err();
    assert!(matches!(
        err,
        QueryError::RequestNotFound { request } if request == "req-ghost".into()
    ));
}

#[tokio::test]
async fn request_with_no_tasks_yields_empty_view() {
    let engine = engine(
        MemoryTemplates::default(),
        MemoryRuns::default(),
        MemoryTasks::default().with_request("req-1", vec![]),
        MemoryLabels::default(),
    );

    let view = engine.request_progress(&"req-1".into()).await.unwrap();
    assert!(view.groups.is_empty());
    assert_eq!(view.direct.total_count, 0);
    assert_eq!(view.global_percent, 0);
}

#[tokio::test]
async fn missing_label_falls_back_and_warns() {
    let engine = engine(
        MemoryTemplates::default(),
        MemoryRuns::default(),
        MemoryTasks::default()
            .with_request("req-1", vec![sp_task("t1", "sp-unlabeled", TaskStatus::Done)]),
        MemoryLabels::default(),
    );

    let view = engine.request_progress(&"req-1".into()).await.unwrap();
    assert_eq!(view.groups[0].name, "sp-unlabeled");
    assert_eq!(
        view.warnings,
        vec![DataQualityWarning::UnknownSubProcess {
            sub_process: "sp-unlabeled".into()
        }]
    );
}

#[tokio::test]
async fn collaborator_failures_are_tagged_with_the_store() {
    let broken_templates = WorkflowEngine::new(
        Arc::new(BrokenStore),
        Arc::new(MemoryRuns::default()),
        Arc::new(MemoryTasks::default()),
        Arc::new(MemoryLabels::default()),
    );
    let err = broken_templates
        .workflow_view(&"sp-approval".into(), &"req-1".into(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::Store { store: "template", .. }));

    let broken_tasks = WorkflowEngine::new(
        Arc::new(MemoryTemplates::default()),
        Arc::new(MemoryRuns::default()),
        Arc::new(BrokenStore),
        Arc::new(MemoryLabels::default()),
    );
    let err = broken_tasks
        .request_progress(&"req-1".into())
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::Store { store: "task", .. }));
}
