// steward-core/src/application/governance.rs

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::catalog::{GovernanceStatus, StatusMap, UrnMapper};
use crate::domain::error::DomainError;
use crate::domain::governance::{
    GovernanceConfig, GovernanceRule, ModelSelector, RuleRegistry, Severity, ValidationReport,
    ValidationResult, into_details,
};
use crate::domain::ports::GovernanceStatusProvider;
use crate::domain::project::{Model, ModelGraph};

const MODEL_LOOKUP_RULE: &str = "model_lookup";

/// Runs the enabled rules over the selected models of one graph.
///
/// The rule list is built once, here. Each run gets a fresh report and a
/// fresh status snapshot.
pub struct GovernanceEngine {
    config: GovernanceConfig,
    provider: Arc<dyn GovernanceStatusProvider>,
    graph: ModelGraph,
    mapper: UrnMapper,
    selector: ModelSelector,
    rules: Vec<Box<dyn GovernanceRule>>,
}

impl GovernanceEngine {
    pub fn new(
        config: GovernanceConfig,
        provider: Arc<dyn GovernanceStatusProvider>,
        graph: ModelGraph,
    ) -> Result<Self, DomainError> {
        let selector = ModelSelector::new(
            config.include_patterns.as_slice(),
            config.exclude_patterns.as_slice(),
        )?;
        let mapper = UrnMapper::new(&config.target_platform, &config.environment)
            .with_platform_instance(config.platform_instance.as_deref());
        let rules = RuleRegistry::instantiate(&config);

        for rule in &rules {
            debug!("Enabled rule: {} ({})", rule.name(), rule.severity());
        }

        Ok(Self {
            config,
            provider,
            graph,
            mapper,
            selector,
            rules,
        })
    }

    /// Replaces the registry-built rules (custom or test rules).
    pub fn with_rules(mut self, rules: Vec<Box<dyn GovernanceRule>>) -> Self {
        self.rules = rules;
        self
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    /// Enabled rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Models passing the include/exclude filters, in manifest order.
    pub fn selected_models(&self) -> Vec<&Model> {
        self.graph
            .models()
            .filter(|model| {
                let keep = self.selector.matches(model);
                if !keep {
                    debug!("Skipping model {} (filtered by patterns)", model.name);
                }
                keep
            })
            .collect()
    }

    /// URNs of the selected models and of their resolvable direct upstreams.
    pub fn required_urns(&self, models: &[&Model]) -> BTreeSet<String> {
        let mut urns = BTreeSet::new();
        for model in models {
            urns.insert(self.mapper.model_to_urn(model));
            for upstream in self.graph.upstream_models(model) {
                urns.insert(self.mapper.model_to_urn(upstream));
            }
        }
        urns
    }

    #[instrument(skip(self))]
    pub async fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        let models = self.selected_models();
        report.total_models_checked = models.len();

        let urns = self.required_urns(&models);
        info!(
            "Fetching governance status for {} datasets ({} models selected)",
            urns.len(),
            models.len()
        );
        let statuses = self.provider.fetch_batch(&urns).await;

        for model in models {
            let urn = self.mapper.model_to_urn(model);
            let status = statuses
                .get(&urn)
                .cloned()
                .unwrap_or_else(|| GovernanceStatus::not_found(&urn));
            self.run_rules(model, &status, &statuses, &mut report);
        }

        info!(
            "Validation finished: {} checks, {} errors, {} warnings",
            report.total_checks(),
            report.errors(),
            report.warnings()
        );
        report
    }

    /// Validates one model, found by exact name.
    #[instrument(skip(self))]
    pub async fn validate_single_model(&self, model_name: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        let Some(model) = self.graph.get_model_by_name(model_name) else {
            let lookup_error = DomainError::ModelNotFound(model_name.to_string());
            warn!("{}", lookup_error);
            report.add_result(ValidationResult {
                rule_name: MODEL_LOOKUP_RULE.to_string(),
                model_name: model_name.to_string(),
                model_unique_id: String::new(),
                passed: false,
                severity: Severity::Error,
                message: format!("Model not found in manifest: {}", model_name),
                details: into_details(json!({ "error": lookup_error.to_string() })),
            });
            return report;
        };

        report.total_models_checked = 1;

        let urn = self.mapper.model_to_urn(model);
        let status = self.provider.fetch_one(&urn).await;

        let mut statuses = StatusMap::new();
        statuses.insert(urn, status.clone());
        for upstream in self.graph.upstream_models(model) {
            let upstream_urn = self.mapper.model_to_urn(upstream);
            let upstream_status = self.provider.fetch_one(&upstream_urn).await;
            statuses.insert(upstream_urn, upstream_status);
        }

        self.run_rules(model, &status, &statuses, &mut report);
        report
    }

    fn run_rules(
        &self,
        model: &Model,
        status: &GovernanceStatus,
        statuses: &StatusMap,
        report: &mut ValidationReport,
    ) {
        for rule in &self.rules {
            let result = match rule.validate(model, status, &self.graph, statuses) {
                Ok(result) => result,
                Err(e) => {
                    error!("Rule {} failed on {}: {}", rule.name(), model.name, e);
                    rule_failure(rule.as_ref(), model, &e)
                }
            };
            report.add_result(result);
        }
    }
}

/// Forced error outcome for a rule that could not evaluate a model.
fn rule_failure(rule: &dyn GovernanceRule, model: &Model, e: &DomainError) -> ValidationResult {
    let mut failure = rule.outcome(
        model,
        false,
        format!("Rule execution error: {}", e),
        json!({ "error": e.to_string() }),
    );
    failure.severity = Severity::Error;
    failure
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::governance::{RuleConfig, RuleSettings};
    use crate::domain::project::ModelGraph;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // --- MOCK PROVIDER ---
    #[derive(Default)]
    struct MockProvider {
        statuses: StatusMap,
        batches: Mutex<Vec<BTreeSet<String>>>,
        single_fetches: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn with(statuses: Vec<GovernanceStatus>) -> Self {
            Self {
                statuses: statuses.into_iter().map(|s| (s.urn.clone(), s)).collect(),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl GovernanceStatusProvider for MockProvider {
        async fn test_connection(&self) -> Result<bool, DomainError> {
            Ok(true)
        }

        async fn fetch_status(&self, urn: &str) -> Result<GovernanceStatus, DomainError> {
            self.single_fetches.lock().unwrap().push(urn.to_string());
            Ok(self
                .statuses
                .get(urn)
                .cloned()
                .unwrap_or_else(|| GovernanceStatus::not_found(urn)))
        }

        async fn fetch_batch(&self, urns: &BTreeSet<String>) -> StatusMap {
            self.batches.lock().unwrap().push(urns.clone());
            urns.iter()
                .filter_map(|u| self.statuses.get(u).map(|s| (u.clone(), s.clone())))
                .collect()
        }
    }

    // Règle volontairement cassée pour un modèle donné
    struct Explodes {
        settings: RuleSettings,
        target: &'static str,
    }

    impl GovernanceRule for Explodes {
        fn name(&self) -> &str {
            "explodes"
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
            if model.name == self.target {
                return Err(DomainError::RuleExecution {
                    rule: "explodes".into(),
                    model: model.name.clone(),
                    reason: "boom".into(),
                });
            }
            Ok(self.outcome(model, true, "fine".into(), json!({})))
        }
    }

    fn model(name: &str, deps: &[&str]) -> Model {
        Model {
            unique_id: format!("model.shop.{}", name),
            name: name.to_string(),
            database: Some("analytics".to_string()),
            schema: "marts".to_string(),
            resource_type: "model".to_string(),
            path: format!("marts/{}.sql", name),
            depends_on: deps.iter().map(|d| format!("model.shop.{}", d)).collect(),
            ..Default::default()
        }
    }

    fn urn(name: &str) -> String {
        format!(
            "urn:li:dataset:(urn:li:dataPlatform:snowflake,ANALYTICS.MARTS.{},PROD)",
            name.to_uppercase()
        )
    }

    fn shop_graph() -> ModelGraph {
        ModelGraph::from_models(vec![
            model("staging_users", &[]),
            model("dim_customers", &["staging_users"]),
            model("fct_orders", &["dim_customers", "ghost"]),
        ])
    }

    fn owner_only() -> GovernanceConfig {
        GovernanceConfig {
            rules: vec![RuleConfig::new("require_owner")],
            ..GovernanceConfig::default()
        }
    }

    #[tokio::test]
    async fn test_validate_runs_every_rule_on_every_model() {
        let provider = Arc::new(MockProvider::with(vec![
            GovernanceStatus::found(urn("dim_customers")).with_owners(["urn:li:corpuser:ana"]),
        ]));
        let engine =
            GovernanceEngine::new(GovernanceConfig::default(), provider, shop_graph()).unwrap();

        let report = engine.validate().await;

        assert_eq!(report.total_models_checked, 3);
        assert_eq!(report.total_checks(), 3 * 4);
        // Ordre déterministe: modèle puis règle
        let first: Vec<&str> = report.results()[..4]
            .iter()
            .map(|r| r.rule_name.as_str())
            .collect();
        assert_eq!(
            first,
            vec![
                "require_owner",
                "require_description",
                "no_deprecated_upstream",
                "upstream_must_have_owner"
            ]
        );
        assert!(report.results()[..4].iter().all(|r| r.model_name == "staging_users"));
        assert_eq!(engine.rule_names(), first);
        assert!(!engine.config().fail_on_warnings);

        let dim = report.get_results_for_model("model.shop.dim_customers");
        assert!(dim[0].passed);
        assert!(report.has_errors());
    }

    #[tokio::test]
    async fn test_exclude_pattern_removes_models() {
        let provider = Arc::new(MockProvider::default());
        let config = GovernanceConfig {
            exclude_patterns: vec!["staging_*".to_string()],
            ..owner_only()
        };
        let engine = GovernanceEngine::new(config, provider, shop_graph()).unwrap();

        let report = engine.validate().await;

        assert_eq!(report.total_models_checked, 2);
        assert!(report.results().iter().all(|r| r.model_name != "staging_users"));
    }

    #[tokio::test]
    async fn test_single_batch_includes_upstreams() {
        let provider = Arc::new(MockProvider::default());
        let config = GovernanceConfig {
            include_patterns: vec!["fct_*".to_string()],
            ..owner_only()
        };
        let engine = GovernanceEngine::new(config, provider.clone(), shop_graph()).unwrap();

        let report = engine.validate().await;
        assert_eq!(report.total_models_checked, 1);

        let batches = provider.batches.lock().unwrap();
        assert_eq!(batches.len(), 1);
        // 'ghost' n'existe pas dans le graphe: ignoré
        let expected: BTreeSet<String> = [urn("fct_orders"), urn("dim_customers")].into();
        assert_eq!(batches[0], expected);
        assert!(provider.single_fetches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_batch_entry_reads_as_not_found() {
        let provider = Arc::new(MockProvider::default());
        let engine = GovernanceEngine::new(owner_only(), provider, shop_graph()).unwrap();

        let report = engine.validate().await;
        assert!(report
            .results()
            .iter()
            .all(|r| !r.passed && r.message.contains("not found")));
    }

    #[tokio::test]
    async fn test_broken_rule_is_isolated() {
        let provider = Arc::new(MockProvider::default());
        let settings = RuleSettings {
            severity: Severity::Warning,
            description: String::new(),
        };
        let engine = GovernanceEngine::new(owner_only(), provider, shop_graph())
            .unwrap()
            .with_rules(vec![
                Box::new(Explodes {
                    settings,
                    target: "dim_customers",
                }),
                Box::new(crate::domain::governance::rules::RequireOwner::new(
                    &RuleConfig::new("require_owner"),
                )),
            ]);

        let report = engine.validate().await;

        assert_eq!(report.total_checks(), 6);
        let failures: Vec<&ValidationResult> = report
            .results()
            .iter()
            .filter(|r| r.rule_name == "explodes" && !r.passed)
            .collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].model_name, "dim_customers");
        assert_eq!(failures[0].severity, Severity::Error);
        assert!(failures[0].message.starts_with("Rule execution error:"));
        assert!(failures[0].details["error"].as_str().unwrap().contains("boom"));

        // Les autres paires (règle, modèle) ne sont pas affectées
        let owner_results = report
            .results()
            .iter()
            .filter(|r| r.rule_name == "require_owner")
            .count();
        assert_eq!(owner_results, 3);
    }

    #[tokio::test]
    async fn test_single_model_unknown_name() {
        let provider = Arc::new(MockProvider::default());
        let engine = GovernanceEngine::new(owner_only(), provider, shop_graph()).unwrap();

        let report = engine.validate_single_model("ghost_model").await;

        assert!(report.has_errors());
        assert_eq!(report.total_models_checked, 0);
        assert_eq!(report.results().len(), 1);
        assert_eq!(report.results()[0].rule_name, "model_lookup");
        assert_eq!(report.results()[0].model_unique_id, "");
        assert_eq!(
            report.results()[0].details["error"],
            "Model 'ghost_model' not found in manifest"
        );
    }

    #[tokio::test]
    async fn test_single_model_fetches_individually() {
        let provider = Arc::new(MockProvider::with(vec![
            GovernanceStatus::found(urn("fct_orders")).with_owners(["urn:li:corpuser:bob"]),
        ]));
        let engine = GovernanceEngine::new(owner_only(), provider.clone(), shop_graph()).unwrap();

        let report = engine.validate_single_model("fct_orders").await;

        assert_eq!(report.total_models_checked, 1);
        assert!(report.is_successful());
        assert!(provider.batches.lock().unwrap().is_empty());
        assert_eq!(
            *provider.single_fetches.lock().unwrap(),
            vec![urn("fct_orders"), urn("dim_customers")]
        );
    }

    #[test]
    fn test_invalid_pattern_fails_construction() {
        let config = GovernanceConfig {
            include_patterns: vec!["[oops".to_string()],
            ..GovernanceConfig::default()
        };
        let result = GovernanceEngine::new(config, Arc::new(MockProvider::default()), shop_graph());
        assert!(matches!(result, Err(DomainError::InvalidPattern { .. })));
    }
}
