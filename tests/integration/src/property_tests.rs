//! Property-based tests for sync invariants
//!
//! The engines are async; each case runs on its own current-thread runtime.

use std::collections::BTreeSet;

use proptest::prelude::*;
use tsync_core::{
    BATCH_SIZE, BatchSyncEngine, SyncOptions, SyncOrchestrator, Variable, batch_count,
    detect_drift,
};
use tsync_test_utils::FakeClient;
use tsync_test_utils::fixtures::{float_var, token_file};

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

/// Up to `max` variables with distinct names and arbitrary values
fn variables(max: usize) -> impl Strategy<Value = Vec<Variable>> {
    prop::collection::btree_map("[a-z]{1,6}(/[0-9]{1,3})?", -1000.0..1000.0f64, 0..max).prop_map(
        |values| {
            values
                .into_iter()
                .map(|(name, value)| float_var(&name, value))
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn prop_every_variable_is_created_or_updated(
        vars in variables(320),
        split in prop::collection::vec(any::<bool>(), 320),
    ) {
        let existing: Vec<Variable> = vars
            .iter()
            .zip(&split)
            .filter(|(_, exists)| **exists)
            .map(|(v, _)| v.clone())
            .collect();
        let fake = FakeClient::new().with_variables(existing.clone());
        let engine = BatchSyncEngine::new(fake.shared(), "prop");

        let result = block_on(engine.sync_variables(&vars, &existing, None));

        prop_assert!(result.errors.is_empty());
        prop_assert_eq!(result.created + result.updated, vars.len());
        prop_assert_eq!(result.updated, existing.len());
    }

    #[test]
    fn prop_drift_is_reflexive(vars in variables(50)) {
        let tokens = token_file(vars.clone());
        prop_assert!(!detect_drift(&vars, &tokens).has_drift);
    }

    #[test]
    fn prop_resume_processes_only_later_batches(count in 1usize..450, resume in 1usize..6) {
        let vars: Vec<Variable> = (0..count).map(|i| float_var(&format!("v/{:04}", i), i as f64)).collect();
        let fake = FakeClient::new();
        let engine = BatchSyncEngine::new(fake.shared(), "prop");

        let result = block_on(engine.sync_variables(&vars, &[], Some(resume)));

        let total = batch_count(count);
        let expected: usize = (resume..=total)
            .map(|batch| BATCH_SIZE.min(count - (batch - 1) * BATCH_SIZE))
            .sum();
        prop_assert!(result.errors.is_empty());
        prop_assert_eq!(result.created, expected);
        prop_assert_eq!(fake.create_batches().len(), total.saturating_sub(resume - 1));
    }

    #[test]
    fn prop_diverging_modes_reported_once(name in "[a-z]{1,8}", light in 0.0..10.0f64, dark in 20.0..30.0f64) {
        let expected = token_file(vec![
            Variable::new(name.as_str(), tsync_core::ResolvedType::Float)
                .with_value("default", light)
                .with_value("dark", dark),
        ]);
        let current = vec![
            Variable::new(name.as_str(), tsync_core::ResolvedType::Float)
                .with_value("default", light + 1.0)
                .with_value("dark", dark + 1.0),
        ];

        let report = detect_drift(&current, &expected);

        let names: BTreeSet<&str> = report.drifted_variables.iter().map(|d| d.name.as_str()).collect();
        prop_assert_eq!(report.len(), 1);
        prop_assert_eq!(names.len(), 1);
    }

    #[test]
    fn prop_resume_never_checks_drift(value in 0.0..100.0f64, resume in 1usize..3) {
        let fake = FakeClient::new().with_variables(vec![float_var("space", value + 1.0)]);
        let tokens = token_file(vec![float_var("space", value)]);
        let engine = SyncOrchestrator::new(fake.shared(), "prop");

        let result = block_on(engine.sync(&tokens, &SyncOptions { force_override: false, resume: Some(resume) }));

        prop_assert!(result.drift_detected.is_none());
        prop_assert!(result.success);
    }
}
