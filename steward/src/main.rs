// steward/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::validate::ValidateArgs;

fn init_tracing(verbose: bool, quiet: bool) {
    // RUST_LOG=debug steward validate ... prend le dessus sur -v / -q
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let outcome = match cli.command {
        // --- USE CASE: VALIDATE ---
        Commands::Validate {
            manifest,
            catalog,
            config,
            snapshot,
            dry_run,
            platform,
            environment,
            model,
            format,
            output,
            show_passed,
            fail_on_warnings,
        } => {
            commands::validate::execute(ValidateArgs {
                manifest,
                catalog,
                config,
                snapshot,
                dry_run,
                platform,
                environment,
                model,
                format,
                output,
                show_passed,
                fail_on_warnings,
            })
            .await
        }

        // --- USE CASE: SCAFFOLDING ---
        Commands::Init { output, force } => commands::init::execute(&output, force),

        // --- USE CASE: INSPECTION ---
        Commands::ListModels {
            manifest,
            platform,
            environment,
        } => commands::list_models::execute(&manifest, platform, environment),
        Commands::ListRules => commands::list_rules::execute(),

        // --- USE CASE: CONNECTIVITY ---
        Commands::TestConnection { snapshot } => commands::test_connection::execute(&snapshot).await,
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("💥 Error: {:#}", e);
            ExitCode::from(commands::EXIT_RUNTIME_ERROR)
        }
    }
}
