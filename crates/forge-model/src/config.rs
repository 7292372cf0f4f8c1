//! Generator configuration.
//!
//! Load order: `forge.toml` in the project root → environment variables →
//! defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level dialogforge configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    pub output: OutputConfig,
    pub naming: NamingConfig,
    pub policy: PolicyConfig,
}

/// Where and how generated XML is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory (relative to the output root) holding component nodes.
    pub apps_root: String,
    /// Node name of the generated dialog.
    pub dialog_node: String,
}

/// Fallback names used when authored values cleanse to nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Title of the synthetic tab created for a panel-less tabs container.
    pub default_tab_title: String,
    /// Default node name for fields whose name cleanses to nothing.
    pub default_field_name: String,
}

/// Termination policy: ordered error-kind patterns matched per report.
///
/// A pattern is an error kind name (`validation`, `invalid_setting`,
/// `definition`, `ambiguous_widget`), `*` for any, optionally prefixed with
/// `!` to exempt. First match wins; no match means the build continues.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub terminate_on: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            apps_root: "jcr_root/apps".to_string(),
            dialog_node: "_cq_dialog".to_string(),
        }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            default_tab_title: "newTab".to_string(),
            default_field_name: "field".to_string(),
        }
    }
}

/// Helper to apply an env var override to a config field.
fn env_override(var: &str, target: &mut String) {
    if let Ok(v) = std::env::var(var)
        && !v.is_empty()
    {
        *target = v;
    }
}

impl ForgeConfig {
    /// Load config from `forge.toml` in the project root, with env var
    /// overrides. Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join("forge.toml");

        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        env_override("FORGE_DIALOG_NODE", &mut config.output.dialog_node);
        env_override("FORGE_APPS_ROOT", &mut config.output.apps_root);
        env_override(
            "FORGE_DEFAULT_TAB_TITLE",
            &mut config.naming.default_tab_title,
        );

        if config.naming.default_field_name.is_empty() {
            anyhow::bail!("naming.default_field_name must not be empty");
        }

        Ok(config)
    }
}
