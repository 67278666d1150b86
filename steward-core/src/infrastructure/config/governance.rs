// steward-core/src/infrastructure/config/governance.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::domain::governance::GovernanceConfig;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

pub const DEFAULT_CONFIG_FILENAME: &str = "governance.yml";
pub const ALTERNATE_CONFIG_FILENAMES: [&str; 3] =
    ["governance.yaml", ".governance.yml", ".governance.yaml"];

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# steward governance configuration
# Rules checked against the catalog for every dbt model.

# Target data platform (snowflake, bigquery, redshift, postgres, databricks)
target_platform: snowflake

# Catalog environment (typically PROD, DEV, or STAGING)
environment: PROD

# Platform instance (optional, for multi-account setups)
# platform_instance: my-account

# Fail the validation when there are warnings
fail_on_warnings: false

# Models are matched on name or path. Exclusions win.
include_patterns:
  - "*"

exclude_patterns:
  - "staging_*"
  - "tmp_*"

# Rules run in the order listed here
rules:
  require_owner:
    enabled: true
    severity: error  # error, warning, or info
    description: "All models must have an owner assigned in DataHub"

  require_description:
    enabled: true
    severity: error
    description: "All models must have a description in dbt or DataHub"

  require_domain:
    enabled: false
    severity: warning
    description: "All models should be assigned to a domain in DataHub"

  no_deprecated_upstream:
    enabled: true
    severity: error
    description: "Models cannot depend on deprecated upstream datasets"

  upstream_must_have_owner:
    enabled: true
    severity: warning
    description: "Upstream dependencies should have owners"

  require_tags:
    enabled: false
    severity: warning
    description: "All models should have tags assigned"

  max_upstream_dependencies:
    enabled: false
    severity: warning
    config:
      max_dependencies: 10
"#;

fn candidate_filenames() -> impl Iterator<Item = &'static str> {
    std::iter::once(DEFAULT_CONFIG_FILENAME).chain(ALTERNATE_CONFIG_FILENAMES)
}

/// Looks for a configuration file in `start` and then in each parent directory.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let first = if start.is_dir() { start } else { start.parent()? };

    first.ancestors().find_map(|dir| {
        candidate_filenames()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
            .inspect(|found| debug!(path = ?found, "Found config file"))
    })
}

#[instrument]
pub fn load_config_from_file(path: &Path) -> Result<GovernanceConfig, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::ConfigNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        InfrastructureError::ConfigError(format!("Error reading configuration file: {}", e))
    })?;

    // Première passe non typée: distinguer fichier vide / mauvais type de racine
    let raw: serde_yaml::Value = serde_yaml::from_str(&content).map_err(|e| {
        InfrastructureError::ConfigError(format!("Invalid YAML in configuration file: {}", e))
    })?;

    match raw {
        serde_yaml::Value::Null => Err(InfrastructureError::ConfigError(
            "Configuration file is empty".to_string(),
        )),
        serde_yaml::Value::Mapping(_) => {
            let config: GovernanceConfig = serde_yaml::from_value(raw).map_err(|e| {
                InfrastructureError::ConfigError(format!("Invalid configuration: {}", e))
            })?;
            config
                .validate()
                .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;
            Ok(config)
        }
        _ => Err(InfrastructureError::ConfigError(
            "Configuration file must contain a YAML dictionary".to_string(),
        )),
    }
}

/// Explicit path, else the nearest config file above `start`, else built-in defaults.
///
/// Also returns the file that was used, if any.
pub fn load_config(
    explicit: Option<&Path>,
    start: &Path,
) -> Result<(GovernanceConfig, Option<PathBuf>), InfrastructureError> {
    if let Some(path) = explicit {
        return Ok((load_config_from_file(path)?, Some(path.to_path_buf())));
    }

    match find_config_file(start) {
        Some(found) => {
            info!(path = ?found, "Using configuration file");
            let config = load_config_from_file(&found)?;
            Ok((config, Some(found)))
        }
        None => {
            info!("No configuration file found, using defaults");
            Ok((GovernanceConfig::default(), None))
        }
    }
}

/// Writes the commented default configuration. Refuses to overwrite unless `force`.
pub fn create_default_config_file(path: &Path, force: bool) -> Result<(), InfrastructureError> {
    if path.exists() && !force {
        return Err(InfrastructureError::ConfigError(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    atomic_write(path, DEFAULT_CONFIG_TEMPLATE)?;

    info!(path = ?path, "Created default configuration file");
    Ok(())
}
