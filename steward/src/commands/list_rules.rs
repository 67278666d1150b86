// steward/src/commands/list_rules.rs

use comfy_table::{Table, presets::UTF8_FULL};
use std::process::ExitCode;

use steward_core::domain::governance::{GovernanceConfig, RuleRegistry};

pub fn execute() -> anyhow::Result<ExitCode> {
    let defaults = GovernanceConfig::default();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Rule", "Default", "Description"]);

    for entry in RuleRegistry::entries() {
        let default = match defaults.rule(entry.name) {
            Some(rule) if rule.enabled => format!("on ({})", rule.severity),
            Some(_) => "off".to_string(),
            None => "-".to_string(),
        };
        table.add_row(vec![entry.name.to_string(), default, entry.description.to_string()]);
    }

    println!("📋 Built-in governance rules\n");
    println!("{table}");
    Ok(ExitCode::SUCCESS)
}
