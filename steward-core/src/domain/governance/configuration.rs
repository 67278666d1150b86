// steward-core/src/domain/governance/configuration.rs

use crate::domain::governance::severity::Severity;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use validator::Validate;

/// Settings of one rule, as written under `rules:` in governance.yml.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleConfig {
    pub name: String,
    pub enabled: bool,
    pub severity: Severity,
    pub description: Option<String>,
    /// Rule-specific parameters (ex: `max_dependencies: 8`)
    pub params: Map<String, Value>,
}

impl RuleConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            severity: Severity::Error,
            description: None,
            params: Map::new(),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_param(mut self, key: &str, value: Value) -> Self {
        self.params.insert(key.to_string(), value);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// A rule entry is either a bool toggle, a detailed mapping, or anything
    /// else (enabled with defaults).
    fn from_entry(name: String, entry: serde_yaml::Value) -> Result<Self, serde_yaml::Error> {
        match entry {
            serde_yaml::Value::Bool(enabled) => Ok(Self {
                enabled,
                ..Self::new(name)
            }),
            mapping @ serde_yaml::Value::Mapping(_) => {
                let spec: RuleSpec = serde_yaml::from_value(mapping)?;
                Ok(Self {
                    name,
                    enabled: spec.enabled,
                    severity: spec.severity,
                    description: spec.description,
                    params: spec.config,
                })
            }
            _ => Ok(Self::new(name)),
        }
    }
}

#[derive(Deserialize)]
struct RuleSpec {
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(default)]
    severity: Severity,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    config: Map<String, Value>,
}

#[derive(Serialize)]
struct RuleSpecRef<'a> {
    enabled: bool,
    severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    config: &'a Map<String, Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct GovernanceConfig {
    /// Evaluation order follows the file order.
    #[serde(
        default,
        deserialize_with = "deserialize_rules",
        serialize_with = "serialize_rules"
    )]
    pub rules: Vec<RuleConfig>,

    #[validate(length(min = 1, message = "target_platform cannot be empty"))]
    #[serde(default = "default_platform")]
    pub target_platform: String,

    #[validate(length(min = 1, message = "environment cannot be empty"))]
    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default)]
    pub platform_instance: Option<String>,

    #[serde(default)]
    pub fail_on_warnings: bool,

    #[serde(default = "default_include")]
    pub include_patterns: Vec<String>,

    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl GovernanceConfig {
    pub fn rule(&self, name: &str) -> Option<&RuleConfig> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn enabled_rules(&self) -> impl Iterator<Item = &RuleConfig> {
        self.rules.iter().filter(|r| r.enabled)
    }
}

/// Built-in rule set used when no governance.yml is found.
impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                RuleConfig::new("require_owner")
                    .with_description("All models must have an owner assigned in DataHub"),
                RuleConfig::new("require_description")
                    .with_description("All models must have a description"),
                RuleConfig::new("require_domain")
                    .with_severity(Severity::Warning)
                    .with_description("All models should be assigned to a domain")
                    .disabled(),
                RuleConfig::new("no_deprecated_upstream")
                    .with_description("Models cannot depend on deprecated upstream datasets"),
                RuleConfig::new("upstream_must_have_owner")
                    .with_severity(Severity::Warning)
                    .with_description("Upstream dependencies should have owners"),
            ],
            target_platform: default_platform(),
            environment: default_environment(),
            platform_instance: None,
            fail_on_warnings: false,
            include_patterns: default_include(),
            exclude_patterns: vec![],
        }
    }
}

fn deserialize_rules<'de, D>(deserializer: D) -> Result<Vec<RuleConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    // serde_yaml::Mapping garde l'ordre du fichier
    let raw = Option::<serde_yaml::Mapping>::deserialize(deserializer)?.unwrap_or_default();

    raw.into_iter()
        .map(|(key, entry)| {
            let name = key
                .as_str()
                .ok_or_else(|| D::Error::custom("rule names must be strings"))?
                .to_string();
            RuleConfig::from_entry(name.clone(), entry)
                .map_err(|e| D::Error::custom(format!("rule '{}': {}", name, e)))
        })
        .collect()
}

fn serialize_rules<S>(rules: &[RuleConfig], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(rules.iter().map(|r| {
        (
            r.name.as_str(),
            RuleSpecRef {
                enabled: r.enabled,
                severity: r.severity,
                description: r.description.as_deref(),
                config: &r.params,
            },
        )
    }))
}

fn default_true() -> bool {
    true
}

fn default_platform() -> String {
    "snowflake".to_string()
}

fn default_environment() -> String {
    "PROD".to_string()
}

fn default_include() -> Vec<String> {
    vec!["*".to_string()]
}
