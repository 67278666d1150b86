// steward/src/commands/init.rs
//
// USE CASE: Scaffold a governance.yml.

use anyhow::Context;
use std::path::Path;
use std::process::ExitCode;

use steward_core::infrastructure::config::create_default_config_file;

pub fn execute(output: &Path, force: bool) -> anyhow::Result<ExitCode> {
    create_default_config_file(output, force)
        .with_context(|| format!("Could not create {}", output.display()))?;

    println!("✨ Created governance configuration at {}", output.display());
    println!("   Edit the rules, then run `steward validate`.");
    Ok(ExitCode::SUCCESS)
}
