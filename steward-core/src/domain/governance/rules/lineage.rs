// steward-core/src/domain/governance/rules/lineage.rs

use crate::domain::catalog::{GovernanceStatus, StatusMap};
use crate::domain::error::DomainError;
use crate::domain::governance::configuration::RuleConfig;
use crate::domain::governance::report::ValidationResult;
use crate::domain::governance::rule::{GovernanceRule, RuleSettings};
use crate::domain::project::{Model, ModelGraph};
use serde_json::{Value, json};

const DEFAULT_MAX_DEPENDENCIES: usize = 10;
const LISTED_DEPENDENCIES: usize = 10;

/// Fetched statuses that belong to an upstream model.
///
/// Loose match: the bare model name appears anywhere in the URN, ignoring
/// case. Unrelated datasets whose name contains the model name also match.
/// Swap this for exact URN equality once statuses are keyed by model.
pub fn statuses_for_upstream<'a>(
    upstream_name: &'a str,
    all_statuses: &'a StatusMap,
) -> impl Iterator<Item = (&'a str, &'a GovernanceStatus)> + 'a {
    let needle = upstream_name.to_lowercase();
    all_statuses
        .iter()
        .filter(move |(urn, _)| urn.to_lowercase().contains(&needle))
        .map(|(urn, status)| (urn.as_str(), status))
}

/// Blocks models that read from deprecated datasets.
pub struct NoDeprecatedUpstream {
    settings: RuleSettings,
}

impl NoDeprecatedUpstream {
    pub const NAME: &'static str = "no_deprecated_upstream";
    pub const DESCRIPTION: &'static str = "Models cannot depend on deprecated upstream datasets";

    pub fn new(config: &RuleConfig) -> Self {
        Self {
            settings: RuleSettings::from_config(config, Self::DESCRIPTION),
        }
    }
}

impl GovernanceRule for NoDeprecatedUpstream {
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
        graph: &ModelGraph,
        all_statuses: &StatusMap,
    ) -> Result<ValidationResult, DomainError> {
        let mut offenders = Vec::new();
        for upstream in graph.upstream_models(model) {
            for (urn, status) in statuses_for_upstream(&upstream.name, all_statuses) {
                if status.is_deprecated() {
                    offenders.push(json!({
                        "name": upstream.name,
                        "urn": urn,
                        "note": status.deprecation_note(),
                    }));
                }
            }
        }

        if offenders.is_empty() {
            return Ok(self.outcome(
                model,
                true,
                "No deprecated upstream dependencies found".to_string(),
                json!({ "checked_dependencies": model.depends_on.len() }),
            ));
        }

        Ok(self.outcome(
            model,
            false,
            format!(
                "Model depends on deprecated datasets: {}",
                joined_names(&offenders)
            ),
            json!({ "deprecated_upstreams": offenders }),
        ))
    }
}

/// Flags upstream datasets that exist in the catalog without an owner.
pub struct UpstreamMustHaveOwner {
    settings: RuleSettings,
}

impl UpstreamMustHaveOwner {
    pub const NAME: &'static str = "upstream_must_have_owner";
    pub const DESCRIPTION: &'static str = "Upstream dependencies should have owners";

    pub fn new(config: &RuleConfig) -> Self {
        Self {
            settings: RuleSettings::from_config(config, Self::DESCRIPTION),
        }
    }
}

impl GovernanceRule for UpstreamMustHaveOwner {
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
        graph: &ModelGraph,
        all_statuses: &StatusMap,
    ) -> Result<ValidationResult, DomainError> {
        let mut unowned = Vec::new();
        for upstream in graph.upstream_models(model) {
            for (urn, status) in statuses_for_upstream(&upstream.name, all_statuses) {
                // Unknown datasets are require_owner's business
                if status.exists && !status.has_owner() {
                    unowned.push(json!({ "name": upstream.name, "urn": urn }));
                }
            }
        }

        if unowned.is_empty() {
            return Ok(self.outcome(
                model,
                true,
                "All upstream dependencies have owners".to_string(),
                json!({ "checked_dependencies": model.depends_on.len() }),
            ));
        }

        Ok(self.outcome(
            model,
            false,
            format!(
                "Upstream dependencies without owners: {}",
                joined_names(&unowned)
            ),
            json!({ "unowned_upstreams": unowned }),
        ))
    }
}

/// Caps the number of direct dependencies (`max_dependencies`, default 10).
pub struct MaxUpstreamDependencies {
    settings: RuleSettings,
    max_dependencies: Result<usize, String>,
}

impl MaxUpstreamDependencies {
    pub const NAME: &'static str = "max_upstream_dependencies";
    pub const DESCRIPTION: &'static str =
        "Models should not have too many direct upstream dependencies";

    pub fn new(config: &RuleConfig) -> Self {
        let max_dependencies = match config.params.get("max_dependencies") {
            None => Ok(DEFAULT_MAX_DEPENDENCIES),
            Some(value) => value
                .as_u64()
                .and_then(|v| usize::try_from(v).ok())
                .ok_or_else(|| format!("expected a non-negative integer, got {}", value)),
        };
        Self {
            settings: RuleSettings::from_config(config, Self::DESCRIPTION),
            max_dependencies,
        }
    }
}

impl GovernanceRule for MaxUpstreamDependencies {
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
        let max = self
            .max_dependencies
            .clone()
            .map_err(|reason| DomainError::InvalidRuleParameter {
                rule: Self::NAME.to_string(),
                param: "max_dependencies".to_string(),
                reason,
            })?;
        let count = model.depends_on.len();

        if count > max {
            let listed: Vec<&String> = model.depends_on.iter().take(LISTED_DEPENDENCIES).collect();
            return Ok(self.outcome(
                model,
                false,
                format!("Model has {} upstream dependencies (max: {})", count, max),
                json!({
                    "dependency_count": count,
                    "max_allowed": max,
                    "dependencies": listed,
                }),
            ));
        }

        Ok(self.outcome(
            model,
            true,
            format!(
                "Model has {} upstream dependencies (within limit of {})",
                count, max
            ),
            json!({ "dependency_count": count, "max_allowed": max }),
        ))
    }
}

fn joined_names(entries: &[Value]) -> String {
    entries
        .iter()
        .filter_map(|e| e["name"].as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
