//! Subprocess-backed `RemoteDesignClient`

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tsync_core::{ClientError, ClientResult, RemoteDesignClient, SetupPayload, Variable};

use crate::protocol::{Method, Request, Response};

/// How to launch the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub command: String,
    pub args: Vec<String>,
    /// Per-call limit; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            command: "figma-bridge".to_string(),
            args: Vec::new(),
            timeout: None,
        }
    }
}

impl BridgeConfig {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Talks to the remote design tool through a bridge executable.
///
/// One process is spawned per call and killed if the call is dropped or
/// times out. The client holds no state between calls.
pub struct BridgeClient {
    config: BridgeConfig,
}

impl BridgeClient {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    async fn call(&self, method: Method, file_key: &str, params: Value) -> ClientResult<Value> {
        let input = Request::new(method, file_key, params).encode()?;
        tracing::debug!(
            "Bridge call {:?} on {} ({} bytes)",
            method,
            file_key,
            input.len()
        );

        let stdout = match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, self.run(input))
                .await
                .map_err(|_| ClientError::Timeout {
                    millis: limit.as_millis() as u64,
                })??,
            None => self.run(input).await?,
        };

        Response::decode(&stdout)?.into_result(method)
    }

    async fn run(&self, input: Vec<u8>) -> ClientResult<Vec<u8>> {
        let mut child = Command::new(&self.config.command)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ClientError::Transport {
                message: format!("Failed to start {}: {}", self.config.command, e),
            })?;

        let stdin = child.stdin.take();
        let send = async move {
            match stdin {
                // stdin drops after the write, closing the pipe
                Some(mut stdin) => stdin.write_all(&input).await,
                None => Ok(()),
            }
        };

        // Writing and reading run together so neither side blocks on a full pipe
        let (sent, output) = tokio::join!(send, child.wait_with_output());
        let output = output.map_err(|e| ClientError::Transport {
            message: format!("Failed to read bridge output: {}", e),
        })?;

        if let Err(e) = &sent {
            // A bridge that exits early closes its stdin; its status says why
            tracing::debug!("Bridge stopped reading its request: {}", e);
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!("Bridge exited with {}: {}", output.status, stderr.trim());
            return Err(ClientError::Transport {
                message: format!(
                    "{} exited with {}: {}",
                    self.config.command,
                    output.status,
                    stderr.trim()
                ),
            });
        }

        if let Err(e) = sent
            && e.kind() != ErrorKind::BrokenPipe
        {
            return Err(ClientError::Transport {
                message: format!("Failed to send request: {}", e),
            });
        }

        Ok(output.stdout)
    }
}

fn variables_params(variables: &[Variable]) -> Value {
    json!({ "variables": variables })
}

#[async_trait]
impl RemoteDesignClient for BridgeClient {
    async fn get_variables(&self, file_key: &str) -> ClientResult<Vec<Variable>> {
        let result = self.call(Method::GetVariables, file_key, json!({})).await?;
        serde_json::from_value(result).map_err(|e| ClientError::Protocol {
            message: format!("Invalid variables payload: {}", e),
        })
    }

    async fn batch_create_variables(
        &self,
        file_key: &str,
        variables: &[Variable],
    ) -> ClientResult<()> {
        self.call(
            Method::BatchCreateVariables,
            file_key,
            variables_params(variables),
        )
        .await?;
        Ok(())
    }

    async fn batch_update_variables(
        &self,
        file_key: &str,
        variables: &[Variable],
    ) -> ClientResult<()> {
        self.call(
            Method::BatchUpdateVariables,
            file_key,
            variables_params(variables),
        )
        .await?;
        Ok(())
    }

    async fn execute(&self, file_key: &str, script: &str) -> ClientResult<Value> {
        self.call(Method::Execute, file_key, json!({ "code": script }))
            .await
    }

    async fn setup_design_tokens(
        &self,
        file_key: &str,
        payload: &SetupPayload,
    ) -> ClientResult<()> {
        let params = serde_json::to_value(payload).map_err(|e| ClientError::Protocol {
            message: format!("Failed to encode setup payload: {}", e),
        })?;
        self.call(Method::SetupDesignTokens, file_key, params)
            .await?;
        Ok(())
    }
}
