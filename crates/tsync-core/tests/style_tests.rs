//! Tests for the StyleSyncEngine

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use tsync_core::{StyleSyncEngine, SyncPhase};
use tsync_test_utils::FakeClient;
use tsync_test_utils::fixtures::{shadow_style, text_style};

fn engine(fake: &FakeClient) -> StyleSyncEngine {
    StyleSyncEngine::new(fake.shared(), "file-under-test")
}

fn names(list: &[&str]) -> HashSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_empty_styles_make_no_calls() {
    let fake = FakeClient::new();
    let result = engine(&fake).sync_styles(&[], &HashSet::new()).await;

    assert_eq!((result.created, result.updated), (0, 0));
    assert!(result.errors.is_empty());
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn test_new_styles_are_created() {
    let fake = FakeClient::new();
    let styles = vec![shadow_style("shadow/sm"), text_style("body/md", 16.0, 400)];

    let result = engine(&fake).sync_styles(&styles, &HashSet::new()).await;

    assert_eq!((result.created, result.updated), (2, 0));
    let scripts = fake.scripts();
    assert_eq!(scripts.len(), 2);
    assert!(scripts[0].contains("figma.createEffectStyle()"));
    assert!(scripts[1].contains("figma.createTextStyle()"));
    assert!(scripts[1].contains(r#"style: "Regular""#));
}

#[tokio::test]
async fn test_existing_styles_are_updated_in_place() {
    let fake = FakeClient::new();
    let styles = vec![shadow_style("shadow/sm")];

    let result = engine(&fake)
        .sync_styles(&styles, &names(&["shadow/sm"]))
        .await;

    assert_eq!((result.created, result.updated), (0, 1));
    let script = &fake.scripts()[0];
    assert!(script.contains("figma.getLocalEffectStyles()"));
    assert!(!script.contains("createEffectStyle"));
}

#[tokio::test]
async fn test_failure_does_not_stop_siblings() {
    let fake = FakeClient::new().fail_script_containing("heading/h1");
    let styles = vec![
        text_style("heading/h1", 32.0, 700),
        shadow_style("shadow/sm"),
        text_style("body/md", 16.0, 400),
    ];

    let result = engine(&fake).sync_styles(&styles, &HashSet::new()).await;

    assert_eq!(result.created, 2);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(fake.scripts().len(), 3);

    let err = &result.errors[0];
    assert_eq!(err.phase, SyncPhase::Styles);
    assert_eq!(err.batch, None);
    assert!(
        err.message
            .starts_with("Failed to create style \"heading/h1\": "),
        "got: {}",
        err.message
    );
    assert!(err.message.contains("refused script for heading/h1"));
}

#[tokio::test]
async fn test_error_count_matches_failed_styles() {
    let fake = FakeClient::new()
        .fail_script_containing("shadow/")
        .fail_script_containing("body/lg");
    let styles = vec![
        shadow_style("shadow/sm"),
        shadow_style("shadow/md"),
        text_style("body/md", 16.0, 400),
        text_style("body/lg", 18.0, 400),
    ];

    let result = engine(&fake)
        .sync_styles(&styles, &names(&["body/lg"]))
        .await;

    assert_eq!(result.errors.len(), 3);
    assert_eq!(result.created, 1);
    assert_eq!(result.updated, 0);
    assert!(result.errors[2].message.starts_with("Failed to update style \"body/lg\""));
}
