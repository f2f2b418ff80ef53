//! Client and module-load configuration.
//!
//! Defaults mirror a stock Odoo deployment; everything is overridable via
//! the builder-style setters or by deserializing from a config file.

use std::time::Duration;

use serde::Deserialize;

/// Connection-level settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server base URL.
    pub server_url: String,
    /// Database to authenticate against.
    pub database: String,
    /// Timeout for the authentication call (milliseconds in config files).
    #[serde(with = "duration_ms")]
    pub auth_timeout: Duration,
    /// Timeout for generic model calls.
    #[serde(with = "duration_ms")]
    pub call_timeout: Duration,
    /// Bounded automatic reconnect attempts after a failed connect.
    pub max_retries: u32,
    /// Delay before a scheduled reconnect attempt fires.
    #[serde(with = "duration_ms")]
    pub retry_delay: Duration,
    /// Interval between liveness probes.
    #[serde(with = "duration_ms")]
    pub monitor_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8069".to_string(),
            database: "odoo_db".to_string(),
            auth_timeout: Duration::from_secs(10),
            call_timeout: Duration::from_secs(15),
            max_retries: 3,
            retry_delay: Duration::from_millis(1000),
            monitor_interval: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Sets the server base URL.
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    /// Sets the database name.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Sets the reconnect attempt bound.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the delay before a scheduled reconnect.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Sets the liveness probe interval.
    pub fn with_monitor_interval(mut self, interval: Duration) -> Self {
        self.monitor_interval = interval;
        self
    }
}

/// Module verification settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Modules the application requires.
    pub required: Vec<String>,
    /// Declared dependency order. Verification follows this order filtered
    /// down to `required`; dependency-earlier modules are checked first.
    pub load_order: Vec<String>,
    /// Pause between consecutive module checks. Paces load on the server;
    /// deliberate, not a correctness requirement.
    #[serde(with = "duration_ms")]
    pub pace_delay: Duration,
    /// Poll interval for external status displays. Not consumed by the
    /// sequencer itself.
    #[serde(with = "duration_ms")]
    pub status_check_interval: Duration,
    /// Upper bound a caller may apply to one load pass. Not consumed by the
    /// sequencer itself.
    #[serde(with = "duration_ms")]
    pub load_timeout: Duration,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            required: [
                "base", "web", "mail", "sale", "purchase", "account", "stock", "hr",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
            load_order: [
                "base", "web", "mail", "hr", "account", "stock", "purchase", "sale",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
            pace_delay: Duration::from_millis(500),
            status_check_interval: Duration::from_millis(2000),
            load_timeout: Duration::from_secs(30),
        }
    }
}

impl ModuleConfig {
    /// Sets the required module list.
    pub fn with_required<I, S>(mut self, required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = required.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the declared load order.
    pub fn with_load_order<I, S>(mut self, load_order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.load_order = load_order.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the inter-module pacing delay.
    pub fn with_pace_delay(mut self, delay: Duration) -> Self {
        self.pace_delay = delay;
        self
    }
}

/// Root configuration: connection plus module verification.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub client: ClientConfig,
    pub modules: ModuleConfig,
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_deployment() {
        let config = Config::default();

        assert_eq!(config.client.server_url, "http://localhost:8069");
        assert_eq!(config.client.max_retries, 3);
        assert_eq!(config.client.retry_delay, Duration::from_millis(1000));
        assert_eq!(config.client.monitor_interval, Duration::from_secs(30));
        assert_eq!(config.modules.pace_delay, Duration::from_millis(500));
        assert_eq!(config.modules.required.len(), 8);
        assert_eq!(config.modules.load_order.first().map(String::as_str), Some("base"));
    }

    #[test]
    fn deserializes_durations_from_millis() {
        let json = r#"{
            "client": {"server_url": "https://erp.example.com", "retry_delay": 250},
            "modules": {"required": ["base"], "load_order": ["base"], "pace_delay": 50}
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.client.server_url, "https://erp.example.com");
        assert_eq!(config.client.retry_delay, Duration::from_millis(250));
        assert_eq!(config.modules.pace_delay, Duration::from_millis(50));
        // Unspecified fields keep their defaults.
        assert_eq!(config.client.database, "odoo_db");
    }

    #[test]
    fn builders_override_defaults() {
        let client = ClientConfig::default()
            .with_server_url("http://10.0.0.5:8069")
            .with_database("prod")
            .with_max_retries(1)
            .with_retry_delay(Duration::from_millis(10));

        assert_eq!(client.server_url, "http://10.0.0.5:8069");
        assert_eq!(client.database, "prod");
        assert_eq!(client.max_retries, 1);
        assert_eq!(client.retry_delay, Duration::from_millis(10));
    }
}
