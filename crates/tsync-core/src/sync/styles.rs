//! Per-item create/update of composite styles
//!
//! Unlike variables, a failed style never stops its siblings: every style is
//! attempted and each failure is recorded on its own.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;

use crate::client::{ClientResult, RemoteDesignClient};
use crate::model::Style;
use crate::script::{StyleAction, generate_style_plugin_code};

use super::result::{StyleSyncResult, SyncError, SyncPhase};

/// Creates and updates styles one at a time through scripted execution
pub struct StyleSyncEngine {
    client: Arc<dyn RemoteDesignClient>,
    file_key: String,
}

impl StyleSyncEngine {
    pub fn new(client: Arc<dyn RemoteDesignClient>, file_key: impl Into<String>) -> Self {
        Self {
            client,
            file_key: file_key.into(),
        }
    }

    /// Sync `styles` in order, updating those named in `existing` and
    /// creating the rest.
    pub async fn sync_styles(&self, styles: &[Style], existing: &HashSet<String>) -> StyleSyncResult {
        let mut result = StyleSyncResult::default();

        for style in styles {
            let action = if existing.contains(&style.name) {
                StyleAction::Update
            } else {
                StyleAction::Create
            };

            let outcome = match action {
                StyleAction::Create => self.create_style(style).await,
                StyleAction::Update => self.update_style(style).await,
            };

            match outcome {
                Ok(_) => {
                    tracing::debug!("Style {}: {} succeeded", style.name, action);
                    match action {
                        StyleAction::Create => result.created += 1,
                        StyleAction::Update => result.updated += 1,
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to {} style {}: {}", action, style.name, e);
                    result.errors.push(SyncError::new(
                        SyncPhase::Styles,
                        format!("Failed to {} style \"{}\": {}", action, style.name, e),
                    ));
                }
            }
        }

        if !styles.is_empty() {
            tracing::info!(
                "styles: {} created, {} updated, {} failed",
                result.created,
                result.updated,
                result.errors.len()
            );
        }

        result
    }

    /// Create a new local style
    pub async fn create_style(&self, style: &Style) -> ClientResult<Value> {
        let script = generate_style_plugin_code(style, StyleAction::Create);
        self.client.execute(&self.file_key, &script).await
    }

    /// Overwrite an existing local style matched by name
    pub async fn update_style(&self, style: &Style) -> ClientResult<Value> {
        let script = generate_style_plugin_code(style, StyleAction::Update);
        self.client.execute(&self.file_key, &script).await
    }
}
