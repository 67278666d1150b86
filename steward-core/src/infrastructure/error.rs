// steward-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(steward::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- ARTIFACTS / JSON ---
    #[error("JSON Parsing Error: {0}")]
    #[diagnostic(
        code(steward::infra::json),
        help("Make sure the file is a valid JSON document.")
    )]
    Json(#[from] serde_json::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(steward::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(steward::infra::config))]
    ConfigError(String),

    #[error("Configuration file not found at '{0}'")]
    #[diagnostic(
        code(steward::infra::config_missing),
        help("Run `steward init` to create a governance.yml.")
    )]
    ConfigNotFound(String),

    // --- DBT ARTIFACTS ---
    #[error("Manifest Error ({path}): {reason}")]
    #[diagnostic(
        code(steward::infra::manifest),
        help("Run `dbt compile` (or `dbt docs generate` for catalog.json) to refresh the artifacts.")
    )]
    ManifestError { path: String, reason: String },

    // --- CATALOG SNAPSHOTS ---
    #[error("Catalog snapshot not found at '{0}'")]
    #[diagnostic(
        code(steward::infra::snapshot_missing),
        help("Export the catalog to a JSON or YAML list of dataset statuses, or use --dry-run.")
    )]
    SnapshotNotFound(String),
}
