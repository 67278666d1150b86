// steward/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub const SNAPSHOT_ENV: &str = "STEWARD_CATALOG_SNAPSHOT";

#[derive(Parser)]
#[command(name = "steward")]
#[command(about = "Governance checks for dbt models against a metadata catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Errors only
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Console,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🛡️ Validates dbt models against the governance rules
    Validate {
        /// dbt manifest.json
        #[arg(long, short, default_value = "target/manifest.json")]
        manifest: PathBuf,

        /// dbt catalog.json (column types and comments)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// governance.yml (searched upwards from the current directory by default)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Catalog snapshot (JSON or YAML list of dataset statuses)
        #[arg(long, env = SNAPSHOT_ENV)]
        snapshot: Option<PathBuf>,

        /// Skip the catalog: every model is treated as existing and owned
        #[arg(long)]
        dry_run: bool,

        /// Overrides target_platform
        #[arg(long)]
        platform: Option<String>,

        /// Overrides environment
        #[arg(long)]
        environment: Option<String>,

        /// Validate a single model (exact name)
        #[arg(long)]
        model: Option<String>,

        #[arg(long, short, value_enum, default_value = "console")]
        format: OutputFormat,

        /// Also write the JSON report to this file
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// List passing checks too
        #[arg(long)]
        show_passed: bool,

        /// Warning-severity failures fail the run (info failures never do)
        #[arg(long)]
        fail_on_warnings: bool,
    },

    /// 📝 Writes a commented governance.yml
    Init {
        #[arg(long, short, default_value = "governance.yml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// 📦 Lists the models of a manifest with their catalog URN
    ListModels {
        #[arg(long, short, default_value = "target/manifest.json")]
        manifest: PathBuf,

        #[arg(long)]
        platform: Option<String>,

        #[arg(long)]
        environment: Option<String>,
    },

    /// 📋 Lists the built-in rules
    ListRules,

    /// 🔌 Checks that the catalog can be reached
    TestConnection {
        #[arg(long, env = SNAPSHOT_ENV)]
        snapshot: PathBuf,
    },
}
