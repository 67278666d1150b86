// steward/src/commands/test_connection.rs

use anyhow::Context;
use std::path::Path;
use std::process::ExitCode;

use steward_core::domain::ports::GovernanceStatusProvider;
use steward_core::infrastructure::StaticCatalog;

use super::exit_code;

pub async fn execute(snapshot: &Path) -> anyhow::Result<ExitCode> {
    let catalog = StaticCatalog::from_snapshot(snapshot)
        .with_context(|| format!("Failed to load catalog snapshot {}", snapshot.display()))?;

    let connected = catalog
        .test_connection()
        .await
        .context("Catalog connection failed")?;

    if connected {
        println!(
            "✅ Connected to {} ({} datasets)",
            catalog.label(),
            catalog.len()
        );
    } else {
        eprintln!("❌ Catalog {} is not reachable", catalog.label());
    }
    Ok(exit_code(connected))
}
