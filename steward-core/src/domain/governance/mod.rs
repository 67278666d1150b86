// steward-core/src/domain/governance/mod.rs

pub mod configuration;
pub mod registry;
pub mod report;
pub mod rule;
pub mod rules;
pub mod selection;
pub mod severity;

// Re-exports
pub use configuration::{GovernanceConfig, RuleConfig};
pub use registry::{RuleEntry, RuleRegistry};
pub use report::{ReportSummary, ValidationReport, ValidationResult};
pub use rule::{GovernanceRule, RuleSettings, into_details};
pub use selection::ModelSelector;
pub use severity::Severity;
