//! HTTP transport for the Odoo JSON-RPC endpoints.
//!
//! The rest of the crate treats the wire as a capability: one operation,
//! "send a JSON-RPC request, receive the result payload or an error". The
//! [`Transport`] trait is that seam; [`HttpTransport`] is the reqwest
//! implementation used in production. Tests substitute a scripted transport.

use std::time::Duration;

use async_trait::async_trait;
use odoo_protocol::{RpcRequest, RpcResponse};
use serde_json::Value;

use crate::error::{Error, Result};

/// Capability seam over the wire.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one JSON-RPC call to `endpoint` and returns its `result`
    /// payload.
    ///
    /// A structured fault inside the response surfaces as [`Error::Rpc`];
    /// network-level failure as [`Error::Transport`] or [`Error::Timeout`].
    async fn call(&self, endpoint: &str, params: Value, timeout: Duration) -> Result<Value>;
}

/// reqwest-backed [`Transport`].
///
/// Session cookies set by the authentication endpoint are retained in the
/// client's cookie store and replayed on subsequent calls, so one transport
/// instance carries at most one server session. No process-global state is
/// touched.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Builds a transport for the given server base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|err| Error::Transport(err.to_string()))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { http, base_url })
    }

    /// Base URL this transport talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, endpoint: &str, params: Value, timeout: Duration) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        let request = RpcRequest::call(params);

        tracing::debug!(target: "odoo.transport", %url, "sending request");

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| classify(err, timeout))?;

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|err| Error::Transport(format!("invalid response body: {err}")))?;

        if let Some(fault) = body.error {
            return Err(Error::Rpc {
                message: fault.message().to_string(),
                code: fault.code,
            });
        }

        Ok(body.result.unwrap_or(Value::Null))
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> Error {
    if err.is_timeout() {
        Error::Timeout(timeout)
    } else {
        Error::Transport(err.to_string())
    }
}
