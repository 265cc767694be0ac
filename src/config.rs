//! Configuration file support for sbom-triage.
//!
//! Provides YAML-based configuration through `sbom-triage.config.yml`
//! files: upstream service URLs, the KEV sync switch, and the default
//! output format. CLI flags take precedence over config values.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::shared::Result;

const CONFIG_FILENAME: &str = "sbom-triage.config.yml";

pub const DEFAULT_OSV_BASE_URL: &str = "https://api.osv.dev/v1";
pub const DEFAULT_DEPSDEV_BASE_URL: &str = "https://api.deps.dev/v3alpha";
pub const DEFAULT_EPSS_BASE_URL: &str = "https://api.first.org/data/v1/epss";
pub const DEFAULT_KEV_CATALOG_URL: &str =
    "https://www.cisa.gov/sites/default/files/feeds/known_exploited_vulnerabilities.json";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub osv_base_url: Option<String>,
    pub depsdev_base_url: Option<String>,
    pub epss_base_url: Option<String>,
    pub kev_catalog_url: Option<String>,
    pub sync_kev: Option<bool>,
    pub format: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    let urls = [
        ("osv_base_url", &config.osv_base_url),
        ("depsdev_base_url", &config.depsdev_base_url),
        ("epss_base_url", &config.epss_base_url),
        ("kev_catalog_url", &config.kev_catalog_url),
    ];

    for (name, value) in urls {
        if let Some(url) = value {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("Invalid config: {} must be an http(s) URL, got '{}'", name, url);
            }
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!("unknown config field '{}' will be ignored", key);
    }
}
