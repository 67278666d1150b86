// steward/src/commands/validate.rs
//
// USE CASE: Validate dbt models against the governance rules.

use anyhow::{Context, bail};
use comfy_table::{Table, presets::UTF8_FULL};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

use steward_core::application::GovernanceEngine;
use steward_core::domain::catalog::UrnMapper;
use steward_core::domain::governance::{Severity, ValidationReport, ValidationResult};
use steward_core::domain::ports::{GovernanceStatusProvider, ManifestLoader};
use steward_core::infrastructure::config::load_config;
use steward_core::infrastructure::fs::atomic_write;
use steward_core::infrastructure::{DbtManifestLoader, StaticCatalog};

use super::exit_code;
use crate::cli::{OutputFormat, SNAPSHOT_ENV};

pub struct ValidateArgs {
    pub manifest: PathBuf,
    pub catalog: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub snapshot: Option<PathBuf>,
    pub dry_run: bool,
    pub platform: Option<String>,
    pub environment: Option<String>,
    pub model: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub show_passed: bool,
    pub fail_on_warnings: bool,
}

pub async fn execute(args: ValidateArgs) -> anyhow::Result<ExitCode> {
    // 1. Configuration (+ overrides CLI)
    let cwd = std::env::current_dir()?;
    let (mut config, _) = load_config(args.config.as_deref(), &cwd)
        .context("Failed to load governance configuration")?;
    if let Some(platform) = args.platform {
        config.target_platform = platform;
    }
    if let Some(environment) = args.environment {
        config.environment = environment;
    }
    if args.fail_on_warnings {
        config.fail_on_warnings = true;
    }

    // 2. dbt artifacts
    let graph = DbtManifestLoader
        .load(&args.manifest, args.catalog.as_deref())
        .with_context(|| format!("Failed to load dbt manifest {}", args.manifest.display()))?;

    // 3. Catalog
    let provider: Arc<dyn GovernanceStatusProvider> = if args.dry_run {
        info!("Dry run mode: catalog lookups are simulated");
        let mapper = UrnMapper::new(&config.target_platform, &config.environment)
            .with_platform_instance(config.platform_instance.as_deref());
        Arc::new(StaticCatalog::dry_run(&graph, &mapper))
    } else if let Some(snapshot) = &args.snapshot {
        let catalog = StaticCatalog::from_snapshot(snapshot).with_context(|| {
            format!("Failed to load catalog snapshot {}", snapshot.display())
        })?;
        Arc::new(catalog)
    } else {
        bail!(
            "No catalog configured: pass --snapshot <path> (or set {}) or use --dry-run",
            SNAPSHOT_ENV
        );
    };

    // 4. Engine
    let engine = GovernanceEngine::new(config, provider, graph)
        .context("Invalid governance configuration")?;
    info!("Running rules: {}", engine.rule_names().join(", "));
    let fail_on_warnings = engine.config().fail_on_warnings;
    let report = match &args.model {
        Some(name) => engine.validate_single_model(name).await,
        None => engine.validate().await,
    };

    // 5. Output
    match args.format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Console => print_console(&report, args.show_passed, fail_on_warnings),
    }
    if let Some(output) = &args.output {
        write_json_report(&report, output)?;
        if args.format == OutputFormat::Console {
            println!("📄 JSON report saved to {}", output.display());
        }
    }

    Ok(exit_code(report.is_successful_with(fail_on_warnings)))
}

fn write_json_report(report: &ValidationReport, output: &Path) -> anyhow::Result<()> {
    let json = report.to_json()?;
    atomic_write(output, json)
        .with_context(|| format!("Could not write report to {}", output.display()))?;
    Ok(())
}

// --- CONSOLE RENDERING ---

fn icon(result: &ValidationResult) -> &'static str {
    if result.passed {
        return "✓";
    }
    match result.severity {
        Severity::Error => "✗",
        Severity::Warning => "⚠",
        Severity::Info => "ℹ",
    }
}

fn print_results(title: &str, results: &[&ValidationResult]) {
    if results.is_empty() {
        return;
    }
    println!("\n{} ({})", title, results.len());
    for result in results {
        println!(
            "  {} [{}] {}: {}",
            icon(result),
            result.rule_name,
            result.model_name,
            result.message
        );
    }
}

fn print_console(report: &ValidationReport, show_passed: bool, fail_on_warnings: bool) {
    let summary = report.summary();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Metric", "Count"])
        .add_row(vec!["Models checked".to_string(), summary.total_models_checked.to_string()])
        .add_row(vec!["Total checks".to_string(), summary.total_checks.to_string()])
        .add_row(vec!["Passed".to_string(), summary.passed.to_string()])
        .add_row(vec!["Errors".to_string(), summary.errors.to_string()])
        .add_row(vec!["Warnings".to_string(), summary.warnings.to_string()]);

    println!("🛡️  Governance Validation Report\n");
    println!("{table}");

    print_results("❌ Errors", &report.get_errors());
    print_results("⚠️  Warnings", &report.failures_with(Severity::Warning));
    print_results("ℹ️  Info", &report.failures_with(Severity::Info));
    if show_passed {
        print_results("✅ Passed", &report.get_passed());
    }

    if report.is_successful_with(fail_on_warnings) {
        println!("\n✨ SUCCESS! All governance checks passed.");
    } else if report.has_errors() {
        eprintln!("\n❌ FAILURE. {} governance error(s).", summary.errors);
    } else {
        eprintln!(
            "\n❌ FAILURE. {} warning(s) with fail_on_warnings enabled.",
            report.failures_with(Severity::Warning).len()
        );
    }
}
