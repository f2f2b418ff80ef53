//! JSON-RPC 2.0 envelopes as Odoo's web endpoints speak them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request envelope sent to every web endpoint.
///
/// Odoo routes each web call through `method: "call"`; the endpoint path
/// selects the operation and `params` carries its payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Protocol version, always `"2.0"`.
    pub jsonrpc: String,
    /// Dispatch method, always `"call"` for web endpoints.
    pub method: String,
    /// Operation payload; shape depends on the endpoint.
    pub params: Value,
}

impl RpcRequest {
    /// Builds the standard `{"jsonrpc": "2.0", "method": "call"}` envelope.
    pub fn call(params: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: "call".to_string(),
            params,
        }
    }
}

/// Response envelope: `result` and `error` are mutually exclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Correlation id; the web endpoints echo it back when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Success payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Server-side fault.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcFault>,
}

/// Structured fault carried inside an otherwise successful HTTP response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcFault {
    /// Numeric fault code, when the server provides one.
    #[serde(default)]
    pub code: Option<i64>,
    /// Envelope-level message; often generic ("Odoo Server Error").
    pub message: String,
    /// Detailed fault payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<FaultData>,
}

/// Detail block of a fault; `message` here is usually the human-readable one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultData {
    /// Exception class name on the server side.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Server traceback, when debugging is enabled.
    #[serde(default)]
    pub debug: Option<String>,
}

impl RpcFault {
    /// The most specific message available: `data.message` when present,
    /// otherwise the envelope-level `message`.
    pub fn message(&self) -> &str {
        self.data
            .as_ref()
            .and_then(|data| data.message.as_deref())
            .unwrap_or(&self.message)
    }
}
