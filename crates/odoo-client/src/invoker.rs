//! Authenticated RPC invocation: the thin call layer everything else uses.
//!
//! Both the module sequencer and external callers route through
//! [`Client::call_method`]; the connected-gate lives here so no gated
//! operation ever reaches the wire without a live session.

use odoo_protocol::endpoints;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::connection::Client;
use crate::error::{Error, Result};

impl Client {
    /// Invokes `method` on `model` via the generic call endpoint.
    ///
    /// Gated on connection status: when no live session is held this fails
    /// with [`Error::NotConnected`] before any network activity. A
    /// structured server fault surfaces as [`Error::Rpc`] carrying the
    /// server's message.
    pub async fn call_method(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: Value,
    ) -> Result<Value> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }

        let params = json!({
            "model": model,
            "method": method,
            "args": args,
            "kwargs": kwargs,
        });

        self.transport()
            .call(endpoints::CALL_KW, params, self.config().client.call_timeout)
            .await
    }

    /// Like [`call_method`](Client::call_method), deserializing the result.
    pub async fn call_method_typed<R: DeserializeOwned>(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: Value,
    ) -> Result<R> {
        let value = self.call_method(model, method, args, kwargs).await?;
        serde_json::from_value(value).map_err(Into::into)
    }

    /// `search_read` on `model` with pagination kwargs.
    ///
    /// Not gated at this layer; a dead transport fails on its own. Callers
    /// should prefer routing domain logic through
    /// [`call_method`](Client::call_method).
    pub async fn search_read(
        &self,
        model: &str,
        domain: Value,
        fields: Value,
        limit: u32,
        offset: u32,
    ) -> Result<Value> {
        let params = json!({
            "model": model,
            "method": "search_read",
            "args": [domain, fields],
            "kwargs": {"limit": limit, "offset": offset},
        });

        self.transport()
            .call(
                endpoints::SEARCH_READ,
                params,
                self.config().client.call_timeout,
            )
            .await
    }
}
