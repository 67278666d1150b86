// steward-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Model '{0}' not found in manifest")]
    #[diagnostic(code(steward::domain::model_not_found))]
    ModelNotFound(String),

    #[error("Invalid selection pattern '{pattern}': {reason}")]
    #[diagnostic(
        code(steward::domain::selection),
        help("Use shell-style globs such as 'stg_*' or 'models/marts/*'.")
    )]
    InvalidPattern { pattern: String, reason: String },

    #[error("Unknown severity: {0}")]
    #[diagnostic(
        code(steward::domain::severity),
        help("Expected one of: error, warning, info.")
    )]
    InvalidSeverity(String),

    #[error("Invalid parameter '{param}' for rule '{rule}': {reason}")]
    #[diagnostic(code(steward::domain::rule_param))]
    InvalidRuleParameter {
        rule: String,
        param: String,
        reason: String,
    },

    #[error("Rule '{rule}' failed on '{model}': {reason}")]
    #[diagnostic(code(steward::domain::rule_execution))]
    RuleExecution {
        rule: String,
        model: String,
        reason: String,
    },

    #[error("Catalog connection failed: {0}")]
    #[diagnostic(
        code(steward::domain::catalog_connection),
        help("Check the catalog location and credentials.")
    )]
    CatalogConnection(String),

    #[error("Could not fetch governance status for {urn}: {reason}")]
    #[diagnostic(code(steward::domain::catalog_fetch))]
    CatalogFetch { urn: String, reason: String },
}
