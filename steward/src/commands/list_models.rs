// steward/src/commands/list_models.rs
//
// USE CASE: Show which catalog URN each model maps to.

use anyhow::Context;
use std::path::Path;
use std::process::ExitCode;
use tracing::warn;

use steward_core::domain::catalog::UrnMapper;
use steward_core::domain::governance::GovernanceConfig;
use steward_core::domain::ports::ManifestLoader;
use steward_core::infrastructure::DbtManifestLoader;
use steward_core::infrastructure::config::load_config;

const DESCRIPTION_PREVIEW: usize = 60;

pub fn execute(
    manifest: &Path,
    platform: Option<String>,
    environment: Option<String>,
) -> anyhow::Result<ExitCode> {
    // La config ne sert qu'aux valeurs par défaut de plateforme/environnement
    let cwd = std::env::current_dir()?;
    let config = match load_config(None, &cwd) {
        Ok((config, _)) => config,
        Err(e) => {
            warn!("Ignoring governance configuration: {}", e);
            GovernanceConfig::default()
        }
    };

    let graph = DbtManifestLoader
        .load(manifest, None)
        .with_context(|| format!("Failed to load dbt manifest {}", manifest.display()))?;

    let platform = platform.unwrap_or(config.target_platform);
    let environment = environment.unwrap_or(config.environment);
    let mapper = UrnMapper::new(&platform, &environment)
        .with_platform_instance(config.platform_instance.as_deref());

    println!(
        "📦 {} models (dbt {}) on {} / {}\n",
        graph.model_count(),
        graph.dbt_version,
        mapper.platform(),
        mapper.env()
    );

    for model in graph.models() {
        println!("  {}", model.name);
        println!("    path: {}", model.original_file_path);
        println!("    urn:  {}", mapper.model_to_urn(model));
        if let Some(description) = model.description.as_deref().filter(|_| model.has_description()) {
            let mut preview: String = description.chars().take(DESCRIPTION_PREVIEW).collect();
            if description.chars().count() > DESCRIPTION_PREVIEW {
                preview.push_str("...");
            }
            println!("    description: {}", preview);
        }
    }

    Ok(ExitCode::SUCCESS)
}
