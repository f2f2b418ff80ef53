//! Connection lifecycle: authenticate, bounded retry, liveness monitoring.
//!
//! [`Client`] owns the session state and is its only writer. The scheduled
//! reconnect and the liveness monitor are tokio tasks whose handles live
//! next to the state, so disconnect can cancel the pending retry atomically
//! with the teardown.
//!
//! # State machine
//!
//! ```text
//! disconnected --connect()--> connecting --success--> connected
//!       ^                         │                      │
//!       │        failure, retries remain: connecting (scheduled)
//!       │        failure, retries exhausted: error       │
//!       │                                                │
//!       └-- disconnect() <-- error <-- monitor failure --┘
//! ```
//!
//! `error` is sticky: only an explicit `connect()` or `disconnect()` leaves
//! it.

use std::sync::Arc;

use odoo_protocol::{AuthParams, Identity, endpoints};
use parking_lot::Mutex;
use serde_json::json;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::{Config, ModuleConfig};
use crate::error::{Error, Result};
use crate::sequencer::LoadSummary;
use crate::session::{ConnectionStatus, SessionSnapshot, SessionState};
use crate::transport::{HttpTransport, Transport};

/// Client owning one session against an Odoo server.
///
/// Explicitly constructed and passed to consumers; "at most one active
/// session" is the caller's invariant, not a process-global one. All state
/// writes are serialized behind a single mutex so the monitor task and
/// foreground calls cannot interleave partial updates.
pub struct Client {
    config: Config,
    transport: Arc<dyn Transport>,
    state: Mutex<SessionState>,
    /// Pending scheduled reconnect. Replaced atomically by a newer failure,
    /// aborted by disconnect.
    retry_task: Mutex<Option<JoinHandle<()>>>,
}

impl Client {
    /// Builds a client over HTTP for the configured server.
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let transport = HttpTransport::new(config.client.server_url.clone())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Builds a client over a caller-supplied transport.
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Arc<Self> {
        Arc::new(Self {
            config,
            transport,
            state: Mutex::new(SessionState::default()),
            retry_task: Mutex::new(None),
        })
    }

    /// Settings in effect.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn modules(&self) -> &ModuleConfig {
        &self.config.modules
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Publishes the current session state for the view layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.lock().snapshot()
    }

    /// Current lifecycle status.
    pub fn status(&self) -> ConnectionStatus {
        self.state.lock().status
    }

    /// Whether a live authenticated session is held.
    pub fn is_connected(&self) -> bool {
        self.status().is_connected()
    }

    /// Identity established by the last successful connect.
    pub fn identity(&self) -> Option<Identity> {
        self.state.lock().identity.clone()
    }

    /// Most recent load pass, if any since the last disconnect.
    pub fn last_summary(&self) -> Option<LoadSummary> {
        self.state.lock().last_summary.clone()
    }

    /// Authenticates against the configured database.
    ///
    /// Returns after at most one attempt's latency. On failure with retries
    /// remaining, exactly one delayed re-invocation with the same
    /// credentials is scheduled before returning; the caller observes the
    /// failure immediately and the retry runs in the background. A missing
    /// or falsy `uid` in the response is an authentication failure, not a
    /// transport failure.
    pub async fn connect(
        self: &Arc<Self>,
        username: &str,
        password: &str,
    ) -> std::result::Result<Identity, ConnectFailure> {
        info!(
            target: "odoo.connection",
            server = %self.config.client.server_url,
            login = username,
            "connecting"
        );
        self.state.lock().status = ConnectionStatus::Connecting;

        match self.authenticate(username, password).await {
            Ok(identity) => {
                {
                    let mut state = self.state.lock();
                    state.status = ConnectionStatus::Connected;
                    state.identity = Some(identity.clone());
                    state.retry_count = 0;
                    state.last_error = None;
                }
                info!(
                    target: "odoo.connection",
                    uid = identity.uid,
                    user = %identity.display_name,
                    "connected"
                );
                Ok(identity)
            }
            Err(error) => {
                let (retry_count, retry_scheduled) = {
                    let mut state = self.state.lock();
                    state.status = ConnectionStatus::Error;
                    state.identity = None;
                    state.last_error = Some(error.to_string());
                    if state.retry_count < self.config.client.max_retries {
                        state.retry_count += 1;
                        (state.retry_count, true)
                    } else {
                        (state.retry_count, false)
                    }
                };

                warn!(
                    target: "odoo.connection",
                    error = %error,
                    retry_count,
                    max_retries = self.config.client.max_retries,
                    retry_scheduled,
                    "connect failed"
                );

                if retry_scheduled {
                    self.schedule_retry(username.to_string(), password.to_string());
                }

                Err(ConnectFailure {
                    error,
                    retry_count,
                    retry_scheduled,
                })
            }
        }
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<Identity> {
        let params = AuthParams {
            db: self.config.client.database.clone(),
            login: username.to_string(),
            password: password.to_string(),
        };

        let result = self
            .transport
            .call(
                endpoints::AUTHENTICATE,
                serde_json::to_value(&params)?,
                self.config.client.auth_timeout,
            )
            .await?;

        Identity::from_auth_result(&result, username)
            .ok_or_else(|| Error::Auth("invalid username or password".to_string()))
    }

    fn schedule_retry(self: &Arc<Self>, username: String, password: String) {
        let delay = self.config.client.retry_delay;
        let client = Arc::clone(self);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // This task is the pending retry; clear its slot before
            // re-entering connect so a new failure can schedule its own
            // successor without aborting the task that is running it.
            client.retry_task.lock().take();
            debug!(target: "odoo.connection", "retrying connection");
            let _ = client.connect(&username, &password).await;
        });

        if let Some(previous) = self.retry_task.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Tears the session down.
    ///
    /// The logout request is best-effort; local teardown happens regardless
    /// of its outcome. The pending scheduled reconnect, if any, is cancelled
    /// first so a stale retry cannot resurrect the session afterwards.
    pub async fn disconnect(&self) {
        if let Some(pending) = self.retry_task.lock().take() {
            pending.abort();
        }

        let had_session = self.state.lock().identity.is_some();
        if had_session {
            let logout = self
                .transport
                .call(endpoints::DESTROY, json!({}), self.config.client.call_timeout)
                .await;
            match logout {
                Ok(_) => info!(target: "odoo.connection", "logged out"),
                Err(error) => warn!(
                    target: "odoo.connection",
                    error = %error,
                    "logout failed; tearing down locally"
                ),
            }
        }

        self.state.lock().reset();
        debug!(target: "odoo.connection", "disconnected");
    }

    /// Starts the periodic liveness monitor.
    ///
    /// Every tick, while connected, the current identity is looked up on the
    /// server. A failed probe downgrades the status to `Error`, but
    /// deliberately keeps the identity and the verified modules: liveness
    /// loss is not a disconnect, and there is no automatic reconnect. The
    /// caller starts monitoring after connecting and stops it (drop or
    /// [`MonitorHandle::stop`]) when disconnecting.
    pub fn start_monitoring(self: &Arc<Self>) -> MonitorHandle {
        let interval = self.config.client.monitor_interval;
        let client = Arc::clone(self);

        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                client.probe_liveness().await;
            }
        });

        MonitorHandle { handle }
    }

    async fn probe_liveness(&self) {
        let uid = {
            let state = self.state.lock();
            if !state.status.is_connected() {
                return;
            }
            match &state.identity {
                Some(identity) => identity.uid,
                None => return,
            }
        };

        let probe = self
            .call_method(
                "res.users",
                "search",
                vec![json!([["id", "=", uid]])],
                json!({}),
            )
            .await;

        if let Err(error) = probe {
            warn!(target: "odoo.connection", error = %error, "liveness probe failed");
            let mut state = self.state.lock();
            // A disconnect may have raced the probe; never resurrect an
            // explicitly torn-down session into the error state.
            if state.status.is_connected() {
                state.status = ConnectionStatus::Error;
                state.last_error = Some(error.to_string());
            }
        }
    }

    pub(crate) fn mark_module_verified(&self, name: &str) {
        self.state.lock().verified_modules.insert(name.to_string());
    }

    pub(crate) fn publish_summary(&self, summary: LoadSummary) {
        self.state.lock().last_summary = Some(summary);
    }
}

/// Failure returned by [`Client::connect`].
///
/// Carries the retry bookkeeping the caller needs: how many automatic
/// attempts have been consumed and whether another one is pending.
#[derive(Debug)]
pub struct ConnectFailure {
    /// Why the attempt failed.
    pub error: Error,
    /// Consecutive failed attempts so far, bounded by
    /// [`ClientConfig::max_retries`](crate::ClientConfig::max_retries).
    pub retry_count: u32,
    /// Whether a delayed re-invocation was scheduled before returning.
    pub retry_scheduled: bool,
}

impl std::fmt::Display for ConnectFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ConnectFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Cancellation handle for the liveness monitor.
///
/// The monitor stops when [`stop`](MonitorHandle::stop) is called or when
/// the handle is dropped.
pub struct MonitorHandle {
    handle: JoinHandle<()>,
}

impl MonitorHandle {
    /// Stops the periodic check.
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
