//! [`FakeClient`]: in-memory remote design tool for tests.
//!
//! The fake keeps a list of remote variables, applies successful writes to
//! it, and records every call in order so tests can assert on exactly which
//! remote operations a sync run performed.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{Value, json};
use tsync_core::{ClientError, ClientResult, RemoteDesignClient, SetupPayload, Variable};

/// A recorded remote call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetVariables,
    BatchCreate(Vec<String>),
    BatchUpdate(Vec<String>),
    Execute(String),
    Setup { collections: usize },
}

#[derive(Debug, Default)]
struct State {
    variables: Vec<Variable>,
    calls: Vec<Call>,
    create_calls: usize,
    update_calls: usize,
    fail_create_call: Option<usize>,
    fail_update_call: Option<usize>,
    fail_scripts_containing: Vec<String>,
    fail_get: bool,
    fail_setup: bool,
}

/// In-memory `RemoteDesignClient`.
///
/// Clones share state, so a test can keep one handle for assertions while
/// the engine owns another.
///
/// # Example
///
/// ```rust
/// use tsync_test_utils::FakeClient;
///
/// let fake = FakeClient::new().fail_create_call(2);
/// assert!(fake.calls().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FakeClient {
    state: Arc<Mutex<State>>,
}

impl FakeClient {
    /// An empty remote file
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the remote file with `variables`
    pub fn with_variables(self, variables: Vec<Variable>) -> Self {
        self.lock().variables = variables;
        self
    }

    /// Make the `n`th batch-create call (1-indexed, counted per client) fail
    pub fn fail_create_call(self, n: usize) -> Self {
        self.lock().fail_create_call = Some(n);
        self
    }

    /// Make the `n`th batch-update call (1-indexed, counted per client) fail
    pub fn fail_update_call(self, n: usize) -> Self {
        self.lock().fail_update_call = Some(n);
        self
    }

    /// Make every `execute` whose script contains `needle` fail
    pub fn fail_script_containing(self, needle: impl Into<String>) -> Self {
        self.lock().fail_scripts_containing.push(needle.into());
        self
    }

    pub fn fail_get_variables(self) -> Self {
        self.lock().fail_get = true;
        self
    }

    pub fn fail_setup(self) -> Self {
        self.lock().fail_setup = true;
        self
    }

    /// Wrap a clone for injection into an engine
    pub fn shared(&self) -> Arc<dyn RemoteDesignClient> {
        Arc::new(self.clone())
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Names sent in each batch-create call, including failed ones
    pub fn create_batches(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::BatchCreate(names) => Some(names),
                _ => None,
            })
            .collect()
    }

    /// Names sent in each batch-update call, including failed ones
    pub fn update_batches(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::BatchUpdate(names) => Some(names),
                _ => None,
            })
            .collect()
    }

    /// Scripts passed to `execute`, in order
    pub fn scripts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Execute(script) => Some(script),
                _ => None,
            })
            .collect()
    }

    /// Number of calls that could have modified the remote file
    pub fn write_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| !matches!(c, Call::GetVariables))
            .count()
    }

    /// Current remote variables
    pub fn variables(&self) -> Vec<Variable> {
        self.lock().variables.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

fn names(variables: &[Variable]) -> Vec<String> {
    variables.iter().map(|v| v.name.clone()).collect()
}

fn upsert(store: &mut Vec<Variable>, variable: &Variable) {
    match store.iter_mut().find(|v| v.name == variable.name) {
        Some(existing) => *existing = variable.clone(),
        None => store.push(variable.clone()),
    }
}

#[async_trait]
impl RemoteDesignClient for FakeClient {
    async fn get_variables(&self, _file_key: &str) -> ClientResult<Vec<Variable>> {
        let mut state = self.lock();
        state.calls.push(Call::GetVariables);
        if state.fail_get {
            return Err(ClientError::Transport {
                message: "bridge unavailable".to_string(),
            });
        }
        Ok(state.variables.clone())
    }

    async fn batch_create_variables(
        &self,
        _file_key: &str,
        variables: &[Variable],
    ) -> ClientResult<()> {
        let mut state = self.lock();
        state.calls.push(Call::BatchCreate(names(variables)));
        state.create_calls += 1;
        if state.fail_create_call == Some(state.create_calls) {
            return Err(ClientError::rejected(format!(
                "create call {} rejected",
                state.create_calls
            )));
        }
        for variable in variables {
            upsert(&mut state.variables, variable);
        }
        Ok(())
    }

    async fn batch_update_variables(
        &self,
        _file_key: &str,
        variables: &[Variable],
    ) -> ClientResult<()> {
        let mut state = self.lock();
        state.calls.push(Call::BatchUpdate(names(variables)));
        state.update_calls += 1;
        if state.fail_update_call == Some(state.update_calls) {
            return Err(ClientError::rejected(format!(
                "update call {} rejected",
                state.update_calls
            )));
        }
        for variable in variables {
            upsert(&mut state.variables, variable);
        }
        Ok(())
    }

    async fn execute(&self, _file_key: &str, script: &str) -> ClientResult<Value> {
        let mut state = self.lock();
        state.calls.push(Call::Execute(script.to_string()));
        if let Some(needle) = state
            .fail_scripts_containing
            .iter()
            .find(|needle| script.contains(needle.as_str()))
        {
            return Err(ClientError::script(format!("refused script for {}", needle)));
        }
        let id = state.calls.len();
        Ok(json!(format!("S:{}", id)))
    }

    async fn setup_design_tokens(
        &self,
        _file_key: &str,
        payload: &SetupPayload,
    ) -> ClientResult<()> {
        let mut state = self.lock();
        state.calls.push(Call::Setup {
            collections: payload.collections.len(),
        });
        if state.fail_setup {
            return Err(ClientError::rejected("file is not empty"));
        }
        for collection in &payload.collections {
            for variable in &collection.variables {
                upsert(&mut state.variables, variable);
            }
        }
        Ok(())
    }
}
