//! Drift detection between remote variables and the expected token state
//!
//! Drift means someone edited a variable in the remote tool after the last
//! push. Only variables the token file knows about are compared; remote-only
//! variables may come from another source and are never drift.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{TokenFile, TokenValue, Variable};

/// A variable whose remote value diverges from the expected one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftedVariable {
    pub name: String,
    /// First mode (in mode-name order) found to diverge
    pub mode: String,
    pub expected_value: TokenValue,
    /// `None` when the remote variable has no value for `mode`
    pub actual_value: Option<TokenValue>,
}

/// Result of comparing remote state against the expected state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftReport {
    pub has_drift: bool,
    pub drifted_variables: Vec<DriftedVariable>,
}

impl DriftReport {
    /// A report with no drift
    pub fn clean() -> Self {
        Self::default()
    }

    /// Create a report from drifted entries; `has_drift` follows from them
    pub fn with_drifted(drifted_variables: Vec<DriftedVariable>) -> Self {
        Self {
            has_drift: !drifted_variables.is_empty(),
            drifted_variables,
        }
    }

    pub fn len(&self) -> usize {
        self.drifted_variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drifted_variables.is_empty()
    }
}

/// Compare `current` remote variables against the `expected` token file.
///
/// Each known variable contributes at most one entry: the first expected mode
/// whose remote value differs. Entries follow the order of `current`.
pub fn detect_drift(current: &[Variable], expected: &TokenFile) -> DriftReport {
    let lookup: HashMap<&str, &Variable> = expected
        .collections
        .iter()
        .flat_map(|c| c.variables.iter())
        .map(|v| (v.name.as_str(), v))
        .collect();

    let mut drifted = Vec::new();

    for actual in current {
        let Some(wanted) = lookup.get(actual.name.as_str()) else {
            continue;
        };

        let divergence = wanted
            .values_by_mode
            .iter()
            .find(|(mode, value)| actual.values_by_mode.get(*mode) != Some(*value));

        if let Some((mode, value)) = divergence {
            tracing::debug!(
                "Variable {} drifted in mode {}: expected {}, found {:?}",
                actual.name,
                mode,
                value,
                actual.values_by_mode.get(mode)
            );
            drifted.push(DriftedVariable {
                name: actual.name.clone(),
                mode: mode.clone(),
                expected_value: value.clone(),
                actual_value: actual.values_by_mode.get(mode).cloned(),
            });
        }
    }

    DriftReport::with_drifted(drifted)
}
