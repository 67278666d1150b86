// steward-core/src/domain/governance/rule.rs

use crate::domain::catalog::{GovernanceStatus, StatusMap};
use crate::domain::error::DomainError;
use crate::domain::governance::configuration::RuleConfig;
use crate::domain::governance::report::ValidationResult;
use crate::domain::governance::severity::Severity;
use crate::domain::project::{Model, ModelGraph};
use serde_json::{Map, Value};

/// Severity and display text every rule carries from its configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSettings {
    pub severity: Severity,
    pub description: String,
}

impl RuleSettings {
    pub fn from_config(config: &RuleConfig, fallback_description: &str) -> Self {
        Self {
            severity: config.severity,
            description: config
                .description
                .clone()
                .unwrap_or_else(|| fallback_description.to_string()),
        }
    }
}

/// One policy check, evaluated per model.
///
/// `validate` must be read-only. An `Err` is not fatal: the engine turns it
/// into a forced `error` outcome for that (rule, model) pair.
pub trait GovernanceRule: Send + Sync {
    fn name(&self) -> &str;

    fn settings(&self) -> &RuleSettings;

    fn description(&self) -> &str {
        &self.settings().description
    }

    fn severity(&self) -> Severity {
        self.settings().severity
    }

    fn validate(
        &self,
        model: &Model,
        status: &GovernanceStatus,
        graph: &ModelGraph,
        all_statuses: &StatusMap,
    ) -> Result<ValidationResult, DomainError>;

    /// Builds an outcome stamped with this rule's name and severity.
    fn outcome(&self, model: &Model, passed: bool, message: String, details: Value) -> ValidationResult {
        ValidationResult {
            rule_name: self.name().to_string(),
            model_name: model.name.clone(),
            model_unique_id: model.unique_id.clone(),
            passed,
            severity: self.severity(),
            message,
            details: into_details(details),
        }
    }
}

/// Flattens a `json!({...})` literal into a details bag.
pub fn into_details(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}
