//! End-to-end sync scenarios against the in-memory remote
//!
//! Each test drives the public orchestrator/engine API and checks both the
//! returned result and the remote calls that were made.

use std::collections::HashSet;
use std::path::Path;

use pretty_assertions::assert_eq;
use tsync_core::{
    DriftedVariable, StyleSyncEngine, SyncError, SyncOptions, SyncOrchestrator, SyncPhase,
    TokenFile, TokenValue,
};
use tsync_test_utils::fixtures::{
    float_var, numbered_vars, shadow_style, text_style, token_file, token_file_with_styles,
};
use tsync_test_utils::{Call, FakeClient};

const FILE_KEY: &str = "scenario-file";

fn orchestrator(fake: &FakeClient) -> SyncOrchestrator {
    SyncOrchestrator::new(fake.shared(), FILE_KEY)
}

#[tokio::test]
async fn test_new_variable_is_created() {
    let fake = FakeClient::new();
    let tokens = token_file(vec![float_var("space100", 8.0)]);

    let result = orchestrator(&fake)
        .sync(&tokens, &SyncOptions::default())
        .await;

    assert!(result.success);
    assert_eq!(result.created, 1);
    assert_eq!(result.updated, 0);
    assert_eq!(fake.variables(), vec![float_var("space100", 8.0)]);
}

#[tokio::test]
async fn test_matching_variable_is_still_pushed() {
    let fake = FakeClient::new().with_variables(vec![float_var("space100", 8.0)]);
    let tokens = token_file(vec![float_var("space100", 8.0)]);

    let result = orchestrator(&fake)
        .sync(&tokens, &SyncOptions::default())
        .await;

    assert!(result.success);
    assert_eq!(result.created, 0);
    assert_eq!(result.updated, 1);
    assert_eq!(fake.update_batches(), vec![vec!["space100".to_string()]]);
}

#[tokio::test]
async fn test_remote_edit_aborts_without_writes() {
    let fake = FakeClient::new().with_variables(vec![float_var("space300", 25.0)]);
    let tokens = token_file(vec![float_var("space300", 24.0)]);

    let result = orchestrator(&fake)
        .sync(&tokens, &SyncOptions::default())
        .await;

    assert!(!result.success);
    let drift = result.drift_detected.expect("drift report");
    assert!(drift.has_drift);
    assert_eq!(
        drift.drifted_variables,
        vec![DriftedVariable {
            name: "space300".to_string(),
            mode: "default".to_string(),
            expected_value: TokenValue::Float(24.0),
            actual_value: Some(TokenValue::Float(25.0)),
        }]
    );
    assert_eq!(fake.write_count(), 0);
    assert_eq!(fake.variables(), vec![float_var("space300", 25.0)]);
}

#[tokio::test]
async fn test_failed_create_batch_stops_the_run() {
    let fake = FakeClient::new().fail_create_call(2);
    let tokens = token_file(numbered_vars("space", 250));

    let result = orchestrator(&fake)
        .sync(&tokens, &SyncOptions::default())
        .await;

    assert!(!result.success);
    assert_eq!(result.created, 100);
    assert_eq!(result.updated, 0);
    assert_eq!(
        result.errors,
        vec![SyncError::batch(
            SyncPhase::VariablesCreate,
            2,
            3,
            "create call 2 rejected"
        )]
    );
    // Batch 3 never ran and nothing was updated
    assert_eq!(fake.create_batches().len(), 2);
    assert!(fake.update_batches().is_empty());
}

#[tokio::test]
async fn test_failed_style_update_does_not_stop_other_styles() {
    let fake = FakeClient::new().fail_script_containing("shadow/existing");
    let engine = StyleSyncEngine::new(fake.shared(), FILE_KEY);
    let styles = vec![
        text_style("body/new", 16.0, 400),
        shadow_style("shadow/existing"),
    ];
    let existing: HashSet<String> = ["shadow/existing".to_string()].into_iter().collect();

    let result = engine.sync_styles(&styles, &existing).await;

    assert_eq!(result.created, 1);
    assert_eq!(result.updated, 0);
    assert_eq!(result.errors.len(), 1);
    let error = &result.errors[0];
    assert_eq!(error.phase, SyncPhase::Styles);
    assert!(error.message.contains("shadow/existing"), "got: {}", error.message);
    assert!(
        error.message.contains("refused script for shadow/existing"),
        "got: {}",
        error.message
    );
    assert_eq!(fake.scripts().len(), 2);
}

#[tokio::test]
async fn test_resume_completes_a_failed_update_phase() {
    let fake = FakeClient::new()
        .with_variables(numbered_vars("space", 250))
        .fail_update_call(2);
    let tokens = token_file(numbered_vars("space", 250));
    let engine = orchestrator(&fake);

    let failed = engine.sync(&tokens, &SyncOptions::default()).await;
    assert_eq!(failed.updated, 100);
    let batch = failed.errors[0].batch.expect("failed batch");
    assert_eq!(batch, 2);

    let resumed = engine
        .sync(
            &tokens,
            &SyncOptions {
                force_override: false,
                resume: Some(batch),
            },
        )
        .await;

    assert!(resumed.success, "errors: {:?}", resumed.errors);
    assert_eq!(resumed.updated, 150);
    // Two calls from the failed run, two from the resumed one
    assert_eq!(fake.update_batches().len(), 4);
}

#[tokio::test]
async fn test_rerun_after_failed_create_updates_what_was_created() {
    let fake = FakeClient::new().fail_create_call(2);
    let tokens = token_file(numbered_vars("space", 250));
    let engine = orchestrator(&fake);

    let failed = engine.sync(&tokens, &SyncOptions::default()).await;
    let rerun = engine.sync(&tokens, &SyncOptions::default()).await;

    assert!(!failed.success);
    assert!(rerun.success, "errors: {:?}", rerun.errors);
    assert_eq!(rerun.created, 150);
    assert_eq!(rerun.updated, 100);
    assert_eq!(fake.variables().len(), 250);
}

#[tokio::test]
async fn test_second_sync_is_all_updates() {
    let fake = FakeClient::new();
    let tokens = token_file_with_styles(
        numbered_vars("radius", 12),
        vec![shadow_style("elevation/1"), text_style("body/md", 16.0, 400)],
    );
    let engine = orchestrator(&fake);

    let first = engine.sync(&tokens, &SyncOptions::default()).await;
    let second = engine.sync(&tokens, &SyncOptions::default()).await;

    assert!(first.success);
    assert_eq!(first.created, 14);
    assert!(second.success);
    // Styles cannot be listed remotely, so they are created again
    assert_eq!(second.updated, 12);
    assert_eq!(second.created, 2);
}

#[tokio::test]
async fn test_setup_then_sync_sees_no_drift() {
    let fake = FakeClient::new();
    let tokens = token_file(numbered_vars("space", 5));
    let engine = orchestrator(&fake);

    let setup = engine.initial_setup(&tokens).await;
    let report = engine.check_drift(&tokens).await.unwrap();

    assert!(setup.success);
    assert_eq!(setup.created, 5);
    assert!(!report.has_drift);
    assert_eq!(fake.calls()[0], Call::Setup { collections: 1 });
}

#[tokio::test]
async fn test_fixture_file_syncs_cleanly() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/tokens/basic.json");
    let tokens = TokenFile::load(&path).unwrap();
    tokens.validate().unwrap();
    let fake = FakeClient::new();

    let result = orchestrator(&fake)
        .sync(&tokens, &SyncOptions::default())
        .await;

    assert!(result.success, "errors: {:?}", result.errors);
    assert_eq!(result.created, 7);
    assert_eq!(fake.scripts().len(), 2);
}
