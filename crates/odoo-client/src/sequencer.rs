//! Ordered verification of required server-side modules.
//!
//! One load pass walks the declared dependency order filtered down to the
//! required set, queries the module registry for each entry strictly
//! sequentially, and aggregates the per-module outcomes into a
//! [`LoadSummary`]. Partial failure is represented in the summary, never as
//! an error: a dead module check must not abort the pass.

use odoo_protocol::{ModuleRecord, ModuleState};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::connection::Client;

/// Verification state of one module as seen by this client: the remote
/// registry states plus the two client-side outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleCheckState {
    Installed,
    Uninstalled,
    ToInstall,
    ToUpgrade,
    ToRemove,
    Unknown,
    /// The registry has no row for this name.
    NotFound,
    /// The query itself failed; details in [`ModuleStatus::error`].
    Error,
}

impl From<ModuleState> for ModuleCheckState {
    fn from(state: ModuleState) -> Self {
        match state {
            ModuleState::Installed => ModuleCheckState::Installed,
            ModuleState::Uninstalled => ModuleCheckState::Uninstalled,
            ModuleState::ToInstall => ModuleCheckState::ToInstall,
            ModuleState::ToUpgrade => ModuleCheckState::ToUpgrade,
            ModuleState::ToRemove => ModuleCheckState::ToRemove,
            ModuleState::Unknown => ModuleCheckState::Unknown,
        }
    }
}

impl std::fmt::Display for ModuleCheckState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModuleCheckState::Installed => "installed",
            ModuleCheckState::Uninstalled => "uninstalled",
            ModuleCheckState::ToInstall => "to install",
            ModuleCheckState::ToUpgrade => "to upgrade",
            ModuleCheckState::ToRemove => "to remove",
            ModuleCheckState::Unknown => "unknown",
            ModuleCheckState::NotFound => "not found",
            ModuleCheckState::Error => "error",
        };
        f.write_str(name)
    }
}

/// Result of one module registry query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleStatus {
    pub name: String,
    pub state: ModuleCheckState,
    /// Whether the remote state is `installed`.
    pub installed: bool,
    /// Installed version, verbatim from the registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Query failure message, when `state` is [`ModuleCheckState::Error`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-module outcome of a load pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Loaded,
    NotInstalled,
    Error,
}

/// One entry of [`LoadSummary::results`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleOutcome {
    pub module: String,
    pub outcome: OutcomeKind,
    /// Full status detail behind the outcome.
    pub status: ModuleStatus,
}

/// Aggregate of one load pass.
///
/// `loaded + not_installed + failed == total` holds for every pass; `total`
/// is the size of the computed verification order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub total: usize,
    pub loaded: usize,
    pub not_installed: usize,
    pub failed: usize,
    /// Outcomes in verification order.
    pub results: Vec<ModuleOutcome>,
}

impl Client {
    /// Queries the module registry for `name`.
    ///
    /// Failure is data here, not control flow: a query error (including
    /// calling while disconnected) yields a status with
    /// [`ModuleCheckState::Error`] so a load pass can continue past it.
    /// Idempotent for unchanged server state.
    pub async fn check_module_status(&self, name: &str) -> ModuleStatus {
        let domain = json!([["name", "=", name]]);
        let fields = json!(["name", "state", "installed_version"]);

        let result = self
            .call_method(
                "ir.module.module",
                "search_read",
                vec![domain, fields],
                json!({}),
            )
            .await;

        let value = match result {
            Ok(value) => value,
            Err(error) => {
                warn!(
                    target: "odoo.modules",
                    module = name,
                    error = %error,
                    "module status check failed"
                );
                return ModuleStatus {
                    name: name.to_string(),
                    state: ModuleCheckState::Error,
                    installed: false,
                    version: None,
                    error: Some(error.to_string()),
                };
            }
        };

        match serde_json::from_value::<Vec<ModuleRecord>>(value) {
            Ok(records) => match records.into_iter().next() {
                Some(record) => ModuleStatus {
                    name: record.name,
                    state: record.state.into(),
                    installed: record.state.is_installed(),
                    version: record.installed_version,
                    error: None,
                },
                None => ModuleStatus {
                    name: name.to_string(),
                    state: ModuleCheckState::NotFound,
                    installed: false,
                    version: None,
                    error: None,
                },
            },
            Err(error) => ModuleStatus {
                name: name.to_string(),
                state: ModuleCheckState::Error,
                installed: false,
                version: None,
                error: Some(format!("malformed registry row: {error}")),
            },
        }
    }

    /// Verifies every required module in declared dependency order.
    ///
    /// Strictly sequential by design: deterministic result ordering and a
    /// configurable pacing delay between checks, trading throughput for
    /// predictable server load. Verified names are reported into the session
    /// state as they are confirmed; the finished summary is published as the
    /// session's last load pass and returned.
    pub async fn load_required_modules(&self) -> LoadSummary {
        let modules = self.modules();

        let order: Vec<&str> = modules
            .load_order
            .iter()
            .map(String::as_str)
            .filter(|name| modules.required.iter().any(|required| required == name))
            .collect();

        for missing in modules
            .required
            .iter()
            .filter(|required| !modules.load_order.contains(required))
        {
            warn!(
                target: "odoo.modules",
                module = %missing,
                "required module missing from load order; skipping verification"
            );
        }

        info!(target: "odoo.modules", total = order.len(), "verifying required modules");

        let mut results = Vec::with_capacity(order.len());
        let mut loaded = 0usize;
        let mut not_installed = 0usize;
        let mut failed = 0usize;

        for (index, name) in order.iter().enumerate() {
            debug!(target: "odoo.modules", module = *name, "checking module");
            let status = self.check_module_status(name).await;

            let outcome = if status.installed {
                self.mark_module_verified(name);
                loaded += 1;
                debug!(
                    target: "odoo.modules",
                    module = *name,
                    version = status.version.as_deref().unwrap_or("-"),
                    "module verified"
                );
                OutcomeKind::Loaded
            } else if status.state == ModuleCheckState::Error {
                failed += 1;
                OutcomeKind::Error
            } else {
                not_installed += 1;
                warn!(
                    target: "odoo.modules",
                    module = *name,
                    state = %status.state,
                    "module not installed"
                );
                OutcomeKind::NotInstalled
            };

            results.push(ModuleOutcome {
                module: (*name).to_string(),
                outcome,
                status,
            });

            if index + 1 < order.len() {
                tokio::time::sleep(modules.pace_delay).await;
            }
        }

        let summary = LoadSummary {
            total: order.len(),
            loaded,
            not_installed,
            failed,
            results,
        };

        info!(
            target: "odoo.modules",
            loaded = summary.loaded,
            not_installed = summary.not_installed,
            failed = summary.failed,
            "module verification finished"
        );

        self.publish_summary(summary.clone());
        summary
    }
}
