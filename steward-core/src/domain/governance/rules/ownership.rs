// steward-core/src/domain/governance/rules/ownership.rs

use crate::domain::catalog::{GovernanceStatus, StatusMap};
use crate::domain::error::DomainError;
use crate::domain::governance::configuration::RuleConfig;
use crate::domain::governance::report::ValidationResult;
use crate::domain::governance::rule::{GovernanceRule, RuleSettings};
use crate::domain::project::{Model, ModelGraph};
use serde_json::json;

/// The dataset must exist in the catalog and carry at least one owner.
pub struct RequireOwner {
    settings: RuleSettings,
}

impl RequireOwner {
    pub const NAME: &'static str = "require_owner";
    pub const DESCRIPTION: &'static str = "All models must have an owner assigned in DataHub";

    pub fn new(config: &RuleConfig) -> Self {
        Self {
            settings: RuleSettings::from_config(config, Self::DESCRIPTION),
        }
    }
}

impl GovernanceRule for RequireOwner {
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
        if !status.exists {
            return Ok(not_found(self, model, status));
        }

        if status.has_owner() {
            return Ok(self.outcome(
                model,
                true,
                format!("Model has owner(s): {}", status.owners().join(", ")),
                json!({ "owners": status.owners() }),
            ));
        }

        Ok(self.outcome(
            model,
            false,
            "Model does not have an owner assigned in DataHub".to_string(),
            json!({ "urn": status.urn }),
        ))
    }
}

/// The dataset must exist in the catalog and belong to a domain.
pub struct RequireDomain {
    settings: RuleSettings,
}

impl RequireDomain {
    pub const NAME: &'static str = "require_domain";
    pub const DESCRIPTION: &'static str = "All models should be assigned to a domain in DataHub";

    pub fn new(config: &RuleConfig) -> Self {
        Self {
            settings: RuleSettings::from_config(config, Self::DESCRIPTION),
        }
    }
}

impl GovernanceRule for RequireDomain {
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
        if !status.exists {
            return Ok(not_found(self, model, status));
        }

        match status.domain().filter(|_| status.has_domain()) {
            Some(domain) => Ok(self.outcome(
                model,
                true,
                format!("Model is assigned to domain: {}", domain),
                json!({ "domain": domain }),
            )),
            None => Ok(self.outcome(
                model,
                false,
                "Model is not assigned to any domain in DataHub".to_string(),
                json!({ "urn": status.urn }),
            )),
        }
    }
}

fn not_found(rule: &dyn GovernanceRule, model: &Model, status: &GovernanceStatus) -> ValidationResult {
    rule.outcome(
        model,
        false,
        format!("Dataset not found in DataHub: {}", status.urn),
        json!({ "urn": status.urn, "reason": "not_found" }),
    )
}
