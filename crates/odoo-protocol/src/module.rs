//! Records of the server-side module registry (`ir.module.module`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Installation state as reported by the module registry.
///
/// States this client does not know collapse into [`ModuleState::Unknown`]
/// rather than failing deserialization; newer servers grow states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    Installed,
    Uninstalled,
    ToInstall,
    ToUpgrade,
    ToRemove,
    Unknown,
}

impl ModuleState {
    pub fn is_installed(self) -> bool {
        matches!(self, ModuleState::Installed)
    }

    /// Wire name of this state.
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleState::Installed => "installed",
            ModuleState::Uninstalled => "uninstalled",
            ModuleState::ToInstall => "to install",
            ModuleState::ToUpgrade => "to upgrade",
            ModuleState::ToRemove => "to remove",
            ModuleState::Unknown => "unknown",
        }
    }

    fn parse(state: &str) -> Self {
        match state {
            "installed" => ModuleState::Installed,
            "uninstalled" => ModuleState::Uninstalled,
            "to install" => ModuleState::ToInstall,
            "to upgrade" => ModuleState::ToUpgrade,
            "to remove" => ModuleState::ToRemove,
            _ => ModuleState::Unknown,
        }
    }
}

impl std::fmt::Display for ModuleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ModuleState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ModuleState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let state = String::deserialize(deserializer)?;
        Ok(ModuleState::parse(&state))
    }
}

/// One row of a `search_read` over `ir.module.module`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub name: String,
    pub state: ModuleState,
    /// Version of the installed module. Odoo reports `false` instead of
    /// null when nothing is installed, so deserialization must tolerate it.
    #[serde(default, deserialize_with = "version_or_false")]
    pub installed_version: Option<String>,
}

fn version_or_false<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(version) => Some(version),
        _ => None,
    })
}
