// steward/src/commands/mod.rs

pub mod init;
pub mod list_models;
pub mod list_rules;
pub mod test_connection;
pub mod validate;

use std::process::ExitCode;

/// Checks failed (errors, or warnings with fail-on-warnings).
pub const EXIT_VALIDATION_FAILED: u8 = 1;
/// Configuration, parsing or catalog error.
pub const EXIT_RUNTIME_ERROR: u8 = 2;

pub fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_VALIDATION_FAILED)
    }
}
