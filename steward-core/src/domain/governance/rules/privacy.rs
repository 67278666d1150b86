// steward-core/src/domain/governance/rules/privacy.rs

use crate::domain::catalog::{GovernanceStatus, StatusMap};
use crate::domain::error::DomainError;
use crate::domain::governance::configuration::RuleConfig;
use crate::domain::governance::report::ValidationResult;
use crate::domain::governance::rule::{GovernanceRule, RuleSettings};
use crate::domain::project::{ColumnInfo, Model, ModelGraph};
use serde_json::json;

/// Column-name fragments that suggest personal data.
pub const PII_INDICATORS: [&str; 7] = ["email", "phone", "ssn", "address", "name", "dob", "birth"];

const PII_TAG: &str = "pii";
const LISTED_COLUMNS: usize = 3;

/// Flagged in `meta`, or named like personal data.
pub fn looks_like_pii(column: &ColumnInfo) -> bool {
    if column.is_flagged_as_pii() {
        return true;
    }
    let name = column.name.to_lowercase();
    PII_INDICATORS.iter().any(|indicator| name.contains(indicator))
}

/// Models exposing PII-like columns must be tagged `pii`.
pub struct RequirePiiTag {
    settings: RuleSettings,
}

impl RequirePiiTag {
    pub const NAME: &'static str = "require_pii_tag";
    pub const DESCRIPTION: &'static str = "Models with PII columns should have 'pii' tag";

    pub fn new(config: &RuleConfig) -> Self {
        Self {
            settings: RuleSettings::from_config(config, Self::DESCRIPTION),
        }
    }
}

impl GovernanceRule for RequirePiiTag {
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
        let pii_columns: Vec<&str> = model
            .columns
            .iter()
            .filter(|c| looks_like_pii(c))
            .map(|c| c.name.as_str())
            .collect();

        if pii_columns.is_empty() {
            return Ok(self.outcome(
                model,
                true,
                "No PII columns detected".to_string(),
                json!({ "checked_columns": model.columns.len() }),
            ));
        }

        if model.tags.iter().any(|t| t.eq_ignore_ascii_case(PII_TAG)) {
            return Ok(self.outcome(
                model,
                true,
                "Model with PII columns is properly tagged".to_string(),
                json!({ "pii_columns": pii_columns }),
            ));
        }

        let listed = pii_columns
            .iter()
            .take(LISTED_COLUMNS)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        Ok(self.outcome(
            model,
            false,
            format!(
                "Model has PII columns ({}) but is not tagged with '{}'",
                listed, PII_TAG
            ),
            json!({ "pii_columns": pii_columns, "current_tags": model.tags }),
        ))
    }
}
