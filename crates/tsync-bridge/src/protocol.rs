//! Bridge wire format
//!
//! One request per process, one response per process:
//!
//! ```text
//! stdin:  {"method": "batchCreateVariables", "fileKey": "AbC", "params": {"variables": [...]}}
//! stdout: {"ok": true, "result": null}
//!     or: {"ok": false, "error": "Variable collection not found"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tsync_core::{ClientError, ClientResult};

/// Remote operation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Method {
    GetVariables,
    BatchCreateVariables,
    BatchUpdateVariables,
    Execute,
    SetupDesignTokens,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request<'a> {
    pub method: Method,
    pub file_key: &'a str,
    pub params: Value,
}

impl<'a> Request<'a> {
    pub fn new(method: Method, file_key: &'a str, params: Value) -> Self {
        Self {
            method,
            file_key,
            params,
        }
    }

    pub fn encode(&self) -> ClientResult<Vec<u8>> {
        let mut bytes = serde_json::to_vec(self).map_err(|e| ClientError::Protocol {
            message: format!("Failed to encode request: {}", e),
        })?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    pub ok: bool,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<String>,
}

impl Response {
    /// Parse the bridge's stdout.
    ///
    /// Only the last non-empty line is read, so a bridge may log progress
    /// lines to stdout before answering.
    pub fn decode(stdout: &[u8]) -> ClientResult<Self> {
        let text = std::str::from_utf8(stdout).map_err(|e| ClientError::Protocol {
            message: format!("Response is not valid UTF-8: {}", e),
        })?;
        let line = text
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .ok_or_else(|| ClientError::Protocol {
                message: "Bridge produced no response".to_string(),
            })?;

        serde_json::from_str(line).map_err(|e| ClientError::Protocol {
            message: format!("Invalid response {:?}: {}", line, e),
        })
    }

    /// Turn the response into the call's result.
    ///
    /// Refusals from `execute` are script failures; everything else is a
    /// rejection by the remote tool.
    pub fn into_result(self, method: Method) -> ClientResult<Value> {
        if self.ok {
            return Ok(self.result);
        }
        let message = self
            .error
            .unwrap_or_else(|| "Bridge reported failure without a message".to_string());
        Err(match method {
            Method::Execute => ClientError::Script { message },
            _ => ClientError::Rejected { message },
        })
    }
}
