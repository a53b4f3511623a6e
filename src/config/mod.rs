//! Configuration for the external collaborators.
//!
//! Every key has a default matching the stock deployment: a PowerShell
//! session with the Active Directory module, DameWare for remote control and
//! a Track-It portal for tickets. Running without a config file behaves
//! exactly like that deployment.


use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

use crate::paths;

/// Top-level parsed representation of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub queries: QueryTemplates,
    pub remote: RemoteConfig,
    pub history: HistoryConfig,
    pub portal: PortalConfig,
}

/// The long-lived command interpreter used for directory queries.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub program: String,
    pub args: Vec<String>,
    /// Command that prints `{marker}` on its own line.
    pub marker_command: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: "powershell".to_string(),
            args: ["-NoLogo", "-NoProfile", "-NonInteractive", "-Command", "-"]
                .into_iter()
                .map(String::from)
                .collect(),
            marker_command: "Write-Output '{marker}'".to_string(),
        }
    }
}

/// Query templates submitted to the engine.
///
/// Placeholders: `{field}` and `{keyword}` in the search templates,
/// `{name}` and `{description}` in the update template.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryTemplates {
    pub names: String,
    pub descriptions: String,
    pub update: String,
}

impl Default for QueryTemplates {
    fn default() -> Self {
        Self {
            names: concat!(
                r#"(Get-ADComputer -Filter '{field} -like "*{keyword}*"' | Select Name"#,
                r#" | Select-String -Pattern "\w+\d" -List).Matches.Value"#
            )
            .to_string(),
            descriptions: concat!(
                r#"(Get-ADComputer -Filter '{field} -like "*{keyword}*"' -Properties *"#,
                r#" | Select Description | Out-String)"#,
                r#".Replace("Description", "").Replace("-","").Replace(" ", "")"#
            )
            .to_string(),
            update: r#"Set-ADComputer -Identity "{name}" -Description "{description}""#
                .to_string(),
        }
    }
}

/// The remote-control executable launched for a selected machine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    pub program: String,
    /// Arguments; `{name}` is replaced by the machine name.
    pub args: Vec<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            program: r"C:\Program Files (x86)\SolarWinds\DameWare Remote Support\dwrcc.exe"
                .to_string(),
            args: ["-c:", "-h:", "-m:{name}", "-a:1", "-x"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Where the connection audit trail is appended.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    pub path: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("PCHistory.txt"),
        }
    }
}

/// The ticketing portal opened after a session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PortalConfig {
    pub url: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            url: "http://trackit/TrackIt/Account/LogIn?ReturnUrl=%2fTrackIt".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse a config file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid config TOML.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))
    }

    /// Load configuration. Priority:
    /// 1. `explicit` (from `--config` or `ADCONNECT_CONFIG`); must exist
    /// 2. `<user dir>/config.toml` if present
    /// 3. Built-in defaults
    ///
    /// # Errors
    /// Returns an error if a chosen file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let discovered = paths::user_config_file();
        Self::load_from(explicit, discovered.as_deref())
    }

    /// Load configuration from explicit locations. Useful for testing.
    ///
    /// # Errors
    /// Returns an error if a chosen file cannot be read or parsed.
    pub fn load_from(explicit: Option<&Path>, user_file: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match user_file {
            Some(path) if path.is_file() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }
}
