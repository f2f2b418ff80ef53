//! Session state: the single source of truth the view layer reads.
//!
//! The record itself is crate-private and owned exclusively by
//! [`Client`](crate::Client); everything a caller needs is published
//! through [`SessionSnapshot`].

use std::collections::BTreeSet;

use odoo_protocol::Identity;
use serde::Serialize;

use crate::sequencer::LoadSummary;

/// Connection lifecycle states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    /// Authentication exhausted its retries, or a liveness probe failed.
    /// Only an explicit connect or disconnect leaves this state.
    Error,
}

impl ConnectionStatus {
    pub fn is_connected(self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Error => "error",
        };
        f.write_str(name)
    }
}

/// Mutable session record.
///
/// Invariants: `Connected` implies `identity` is present; `Disconnected`
/// implies `identity` is `None` and `verified_modules` is empty.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub status: ConnectionStatus,
    pub identity: Option<Identity>,
    /// Modules confirmed installed. Built monotonically during a load pass,
    /// cleared only by an explicit disconnect.
    pub verified_modules: BTreeSet<String>,
    pub retry_count: u32,
    /// Exactly one current error message, overwritten by the next
    /// operation's outcome.
    pub last_error: Option<String>,
    pub last_summary: Option<LoadSummary>,
}

impl SessionState {
    /// Full teardown required by an explicit disconnect.
    pub fn reset(&mut self) {
        self.status = ConnectionStatus::Disconnected;
        self.identity = None;
        self.verified_modules.clear();
        self.retry_count = 0;
        self.last_error = None;
        self.last_summary = None;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            connected: self.status.is_connected(),
            identity: self.identity.clone(),
            verified_modules: self.verified_modules.iter().cloned().collect(),
            retry_count: self.retry_count,
            last_error: self.last_error.clone(),
        }
    }
}

/// Read-only view of the session published to callers.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub status: ConnectionStatus,
    pub connected: bool,
    pub identity: Option<Identity>,
    /// Sorted names of modules confirmed installed.
    pub verified_modules: Vec<String>,
    pub retry_count: u32,
    pub last_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_pristine_state() {
        let mut state = SessionState {
            status: ConnectionStatus::Connected,
            identity: Some(Identity {
                uid: 2,
                display_name: "admin".to_string(),
            }),
            retry_count: 2,
            last_error: Some("boom".to_string()),
            ..SessionState::default()
        };
        state.verified_modules.insert("base".to_string());

        state.reset();

        assert_eq!(state.status, ConnectionStatus::Disconnected);
        assert!(state.identity.is_none());
        assert!(state.verified_modules.is_empty());
        assert_eq!(state.retry_count, 0);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn snapshot_mirrors_state() {
        let mut state = SessionState::default();
        state.status = ConnectionStatus::Connected;
        state.identity = Some(Identity {
            uid: 5,
            display_name: "demo".to_string(),
        });
        state.verified_modules.insert("web".to_string());
        state.verified_modules.insert("base".to_string());

        let snapshot = state.snapshot();

        assert!(snapshot.connected);
        assert_eq!(snapshot.identity.unwrap().uid, 5);
        // BTreeSet keeps the published list sorted and deterministic.
        assert_eq!(snapshot.verified_modules, vec!["base", "web"]);
    }
}
