// steward-core/src/domain/governance/rules/documentation.rs

use crate::domain::catalog::{GovernanceStatus, StatusMap};
use crate::domain::error::DomainError;
use crate::domain::governance::configuration::RuleConfig;
use crate::domain::governance::report::ValidationResult;
use crate::domain::governance::rule::{GovernanceRule, RuleSettings};
use crate::domain::project::{Model, ModelGraph};
use serde_json::{Value, json};

const DESCRIPTION_EXCERPT: usize = 100;
const MISSING_PREVIEW: usize = 5;

fn excerpt(text: &str) -> String {
    text.chars().take(DESCRIPTION_EXCERPT).collect()
}

/// `null` when the dataset is unknown to the catalog.
fn known_urn(status: &GovernanceStatus) -> Value {
    if status.exists {
        Value::String(status.urn.clone())
    } else {
        Value::Null
    }
}

/// Described either in dbt or in the catalog. dbt wins.
pub struct RequireDescription {
    settings: RuleSettings,
}

impl RequireDescription {
    pub const NAME: &'static str = "require_description";
    pub const DESCRIPTION: &'static str = "All models must have a description";

    pub fn new(config: &RuleConfig) -> Self {
        Self {
            settings: RuleSettings::from_config(config, Self::DESCRIPTION),
        }
    }
}

impl GovernanceRule for RequireDescription {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn settings(&self) -> &RuleSettings {
        &self.settings
    }

    fn validate(
        &self,
        model: &Model,
        status: &GovernanceStatus,
        _graph: &ModelGraph,
        _all_statuses: &StatusMap,
    ) -> Result<ValidationResult, DomainError> {
        if let Some(text) = model.description.as_deref().filter(|_| model.has_description()) {
            return Ok(self.outcome(
                model,
                true,
                "Model has description in dbt manifest".to_string(),
                json!({ "source": "dbt", "description": excerpt(text) }),
            ));
        }

        if status.has_description() {
            return Ok(self.outcome(
                model,
                true,
                "Model has description in DataHub".to_string(),
                json!({
                    "source": "datahub",
                    "description": excerpt(status.description().unwrap_or_default()),
                }),
            ));
        }

        Ok(self.outcome(
            model,
            false,
            "Model does not have a description in dbt or DataHub".to_string(),
            json!({ "urn": known_urn(status) }),
        ))
    }
}

/// Tagged either in dbt or in the catalog.
pub struct RequireTags {
    settings: RuleSettings,
}

impl RequireTags {
    pub const NAME: &'static str = "require_tags";
    pub const DESCRIPTION: &'static str = "All models should have tags assigned";

    pub fn new(config: &RuleConfig) -> Self {
        Self {
            settings: RuleSettings::from_config(config, Self::DESCRIPTION),
        }
    }
}

impl GovernanceRule for RequireTags {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn settings(&self) -> &RuleSettings {
        &self.settings
    }

    fn validate(
        &self,
        model: &Model,
        status: &GovernanceStatus,
        _graph: &ModelGraph,
        _all_statuses: &StatusMap,
    ) -> Result<ValidationResult, DomainError> {
        if !model.tags.is_empty() {
            return Ok(self.outcome(
                model,
                true,
                format!("Model has dbt tags: {}", model.tags.join(", ")),
                json!({ "source": "dbt", "tags": model.tags }),
            ));
        }

        if status.has_tags() {
            return Ok(self.outcome(
                model,
                true,
                format!("Model has DataHub tags: {}", status.tags().join(", ")),
                json!({ "source": "datahub", "tags": status.tags() }),
            ));
        }

        Ok(self.outcome(
            model,
            false,
            "Model does not have any tags in dbt or DataHub".to_string(),
            json!({ "urn": known_urn(status) }),
        ))
    }
}

/// Every declared column carries a description. No columns, nothing to check.
pub struct RequireColumnDescriptions {
    settings: RuleSettings,
}

impl RequireColumnDescriptions {
    pub const NAME: &'static str = "require_column_descriptions";
    pub const DESCRIPTION: &'static str = "All columns should have descriptions";

    pub fn new(config: &RuleConfig) -> Self {
        Self {
            settings: RuleSettings::from_config(config, Self::DESCRIPTION),
        }
    }
}

impl GovernanceRule for RequireColumnDescriptions {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn settings(&self) -> &RuleSettings {
        &self.settings
    }

    fn validate(
        &self,
        model: &Model,
        _status: &GovernanceStatus,
        _graph: &ModelGraph,
        _all_statuses: &StatusMap,
    ) -> Result<ValidationResult, DomainError> {
        let total = model.columns.len();
        if total == 0 {
            return Ok(self.outcome(
                model,
                true,
                "No columns defined in model".to_string(),
                json!({ "column_count": 0 }),
            ));
        }

        let missing: Vec<&str> = model
            .columns
            .iter()
            .filter(|c| !c.is_documented())
            .map(|c| c.name.as_str())
            .collect();

        if missing.is_empty() {
            return Ok(self.outcome(
                model,
                true,
                format!("All {} columns have descriptions", total),
                json!({ "column_count": total }),
            ));
        }

        let mut preview = missing
            .iter()
            .take(MISSING_PREVIEW)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        if missing.len() > MISSING_PREVIEW {
            preview.push_str("...");
        }

        Ok(self.outcome(
            model,
            false,
            format!("Columns missing descriptions: {}", preview),
            json!({
                "missing_columns": missing,
                "total_columns": total,
                "missing_count": missing.len(),
            }),
        ))
    }
}
