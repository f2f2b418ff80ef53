//! Authentication payloads and the identity they establish.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters of [`endpoints::AUTHENTICATE`](crate::endpoints::AUTHENTICATE).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthParams {
    /// Database to authenticate against.
    pub db: String,
    pub login: String,
    pub password: String,
}

/// Authenticated identity established by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Numeric user id (`uid` in the session payload).
    pub uid: i64,
    /// Display name reported by the server, falling back to the login.
    pub display_name: String,
}

impl Identity {
    /// Extracts an identity from an authentication `result` payload.
    ///
    /// Odoo signals bad credentials with `uid: false` rather than an RPC
    /// fault, so anything but a positive integer `uid` yields `None`.
    pub fn from_auth_result(result: &Value, login: &str) -> Option<Self> {
        let uid = result.get("uid")?.as_i64().filter(|uid| *uid > 0)?;
        let display_name = result
            .get("name")
            .and_then(Value::as_str)
            .or_else(|| result.get("username").and_then(Value::as_str))
            .unwrap_or(login)
            .to_string();

        Some(Self { uid, display_name })
    }
}
