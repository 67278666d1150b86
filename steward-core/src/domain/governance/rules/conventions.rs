// steward-core/src/domain/governance/rules/conventions.rs

use crate::domain::catalog::{GovernanceStatus, StatusMap};
use crate::domain::error::DomainError;
use crate::domain::governance::configuration::RuleConfig;
use crate::domain::governance::report::ValidationResult;
use crate::domain::governance::rule::{GovernanceRule, RuleSettings};
use crate::domain::project::{Model, ModelGraph};
use serde_json::{Value, json};

pub const DEFAULT_PREFIXES: [&str; 7] = ["stg_", "int_", "dim_", "fct_", "rpt_", "base_", "raw_"];

/// Model names start with a layer prefix. The list can be replaced with a
/// `prefixes` parameter.
pub struct NamingConvention {
    settings: RuleSettings,
    prefixes: Result<Vec<String>, String>,
}

impl NamingConvention {
    pub const NAME: &'static str = "naming_convention";
    pub const DESCRIPTION: &'static str =
        "Models should follow naming conventions (stg_, int_, dim_, fct_)";

    pub fn new(config: &RuleConfig) -> Self {
        let prefixes = match config.params.get("prefixes") {
            None => Ok(DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_lowercase)
                        .ok_or_else(|| format!("prefix {} is not a string", item))
                })
                .collect(),
            Some(other) => Err(format!("expected a list of strings, got {}", other)),
        };
        Self {
            settings: RuleSettings::from_config(config, Self::DESCRIPTION),
            prefixes,
        }
    }
}

impl GovernanceRule for NamingConvention {
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
        let prefixes = self.prefixes.as_ref().map_err(|reason| {
            DomainError::InvalidRuleParameter {
                rule: Self::NAME.to_string(),
                param: "prefixes".to_string(),
                reason: reason.clone(),
            }
        })?;

        let name = model.name.to_lowercase();
        if let Some(prefix) = prefixes.iter().find(|p| name.starts_with(p.as_str())) {
            return Ok(self.outcome(
                model,
                true,
                format!("Model follows naming convention with prefix '{}'", prefix),
                json!({ "prefix": prefix }),
            ));
        }

        Ok(self.outcome(
            model,
            false,
            format!(
                "Model name '{}' does not follow naming conventions (expected: {})",
                model.name,
                prefixes.join(", ")
            ),
            json!({ "valid_prefixes": prefixes, "model_name": model.name }),
        ))
    }
}

/// The `materialized` config key is set explicitly.
pub struct RequireMaterialization {
    settings: RuleSettings,
}

impl RequireMaterialization {
    pub const NAME: &'static str = "require_materialization";
    pub const DESCRIPTION: &'static str = "Models should have explicit materialization configured";

    pub fn new(config: &RuleConfig) -> Self {
        Self {
            settings: RuleSettings::from_config(config, Self::DESCRIPTION),
        }
    }
}

impl GovernanceRule for RequireMaterialization {
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
        match model.materialization() {
            Some(materialized) => Ok(self.outcome(
                model,
                true,
                format!("Model has materialization: {}", materialized),
                json!({ "materialization": materialized }),
            )),
            None => Ok(self.outcome(
                model,
                false,
                "Model does not have explicit materialization configured".to_string(),
                json!({ "config": model.config }),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::governance::rules::fixtures::{graph, model, urn, with_config};

    fn run(rule: &dyn GovernanceRule, model: &Model) -> Result<ValidationResult, DomainError> {
        rule.validate(
            model,
            &GovernanceStatus::not_found(urn(&model.name)),
            &graph(&[model.clone()]),
            &StatusMap::new(),
        )
    }

    #[test]
    fn test_naming_convention_default_prefixes() -> anyhow::Result<()> {
        let rule = NamingConvention::new(&RuleConfig::new(NamingConvention::NAME));

        let result = run(&rule, &model("DIM_Customers"))?;
        assert!(result.passed);
        assert_eq!(result.details["prefix"], "dim_");

        let result = run(&rule, &model("customers"))?;
        assert!(!result.passed);
        assert_eq!(
            result.message,
            "Model name 'customers' does not follow naming conventions \
             (expected: stg_, int_, dim_, fct_, rpt_, base_, raw_)"
        );
        Ok(())
    }

    #[test]
    fn test_naming_convention_custom_prefixes() -> anyhow::Result<()> {
        let rule = NamingConvention::new(
            &RuleConfig::new(NamingConvention::NAME).with_param("prefixes", json!(["mart_"])),
        );
        assert!(run(&rule, &model("mart_sales"))?.passed);
        assert!(!run(&rule, &model("dim_customers"))?.passed);

        let broken = NamingConvention::new(
            &RuleConfig::new(NamingConvention::NAME).with_param("prefixes", json!("dim_")),
        );
        assert!(run(&broken, &model("dim_customers")).is_err());
        Ok(())
    }

    #[test]
    fn test_materialization() -> anyhow::Result<()> {
        let rule = RequireMaterialization::new(&RuleConfig::new(RequireMaterialization::NAME));

        let table = with_config(model("dim_customers"), "materialized", json!("table"));
        let result = run(&rule, &table)?;
        assert!(result.passed);
        assert_eq!(result.message, "Model has materialization: table");

        let blank = with_config(model("dim_customers"), "materialized", json!(""));
        let result = run(&rule, &blank)?;
        assert!(!result.passed);
        assert_eq!(result.details["config"]["materialized"], "");
        Ok(())
    }
}
