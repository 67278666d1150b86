// steward-core/src/domain/governance/report.rs

use crate::domain::governance::severity::Severity;
use serde::Serialize;
use serde_json::{Map, Value};

/// Outcome of one rule applied to one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub rule_name: String,
    pub model_name: String,
    pub model_unique_id: String,
    pub passed: bool,
    /// Only meaningful when `passed` is false.
    pub severity: Severity,
    pub message: String,
    /// Rule-specific, machine-readable. JSON values, so always serializable.
    pub details: Map<String, Value>,
}

impl ValidationResult {
    pub fn is_error(&self) -> bool {
        !self.passed && self.severity == Severity::Error
    }

    /// Any non-error failure. `info` failures land here too.
    pub fn is_warning(&self) -> bool {
        !self.passed && self.severity != Severity::Error
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct ReportSummary {
    pub total_models_checked: usize,
    pub total_checks: usize,
    pub passed: usize,
    pub errors: usize,
    pub warnings: usize,
    pub success: bool,
}

/// Append-only collection of outcomes for one validation run.
///
/// Counters move together with every append, so
/// `errors + warnings + passed == total_checks` always holds. A failing
/// `info` outcome is counted as a warning, but does not trip `fail_on_warnings`.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    results: Vec<ValidationResult>,
    pub total_models_checked: usize,
    total_checks: usize,
    errors: usize,
    warnings: usize,
    passed: usize,
}

#[derive(Serialize)]
struct ReportDump<'a> {
    summary: ReportSummary,
    results: &'a [ValidationResult],
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: ValidationResult) {
        self.total_checks += 1;
        if result.passed {
            self.passed += 1;
        } else {
            match result.severity {
                Severity::Error => self.errors += 1,
                Severity::Warning | Severity::Info => self.warnings += 1,
            }
        }
        self.results.push(result);
    }

    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    pub fn total_checks(&self) -> usize {
        self.total_checks
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn warnings(&self) -> usize {
        self.warnings
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings > 0
    }

    pub fn is_successful(&self) -> bool {
        !self.has_errors()
    }

    /// Success, optionally treating warnings as failures.
    /// Failing `info` outcomes never fail a run, even with `fail_on_warnings`.
    pub fn is_successful_with(&self, fail_on_warnings: bool) -> bool {
        self.is_successful()
            && !(fail_on_warnings && !self.failures_with(Severity::Warning).is_empty())
    }

    pub fn get_errors(&self) -> Vec<&ValidationResult> {
        self.results.iter().filter(|r| r.is_error()).collect()
    }

    pub fn get_warnings(&self) -> Vec<&ValidationResult> {
        self.results.iter().filter(|r| r.is_warning()).collect()
    }

    /// Failing outcomes of exactly this severity.
    pub fn failures_with(&self, severity: Severity) -> Vec<&ValidationResult> {
        self.results
            .iter()
            .filter(|r| !r.passed && r.severity == severity)
            .collect()
    }

    pub fn get_passed(&self) -> Vec<&ValidationResult> {
        self.results.iter().filter(|r| r.passed).collect()
    }

    pub fn get_results_for_model(&self, model_unique_id: &str) -> Vec<&ValidationResult> {
        self.results
            .iter()
            .filter(|r| r.model_unique_id == model_unique_id)
            .collect()
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            total_models_checked: self.total_models_checked,
            total_checks: self.total_checks,
            passed: self.passed,
            errors: self.errors,
            warnings: self.warnings,
            success: self.is_successful(),
        }
    }

    /// Structural dump: `{ "summary": {...}, "results": [...] }`.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self.dump()).unwrap_or(Value::Null)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.dump())
    }

    fn dump(&self) -> ReportDump<'_> {
        ReportDump {
            summary: self.summary(),
            results: &self.results,
        }
    }
}
