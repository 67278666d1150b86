// steward-core/src/domain/governance/registry.rs

use crate::domain::governance::configuration::{GovernanceConfig, RuleConfig};
use crate::domain::governance::rule::GovernanceRule;
use crate::domain::governance::rules::{
    MaxUpstreamDependencies, NamingConvention, NoDeprecatedUpstream, RequireColumnDescriptions,
    RequireDescription, RequireDomain, RequireMaterialization, RequireOwner, RequirePiiTag,
    RequireTags, UpstreamMustHaveOwner,
};
use tracing::debug;

/// One built-in rule: its name, default description and constructor.
#[derive(Clone, Copy)]
pub struct RuleEntry {
    pub name: &'static str,
    pub description: &'static str,
    build: fn(&RuleConfig) -> Box<dyn GovernanceRule>,
}

impl RuleEntry {
    pub fn build(&self, config: &RuleConfig) -> Box<dyn GovernanceRule> {
        (self.build)(config)
    }
}

impl std::fmt::Debug for RuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

// --- BUILT-IN RULES ---

static BUILTIN_RULES: &[RuleEntry] = &[
    RuleEntry {
        name: RequireOwner::NAME,
        description: RequireOwner::DESCRIPTION,
        build: |c| Box::new(RequireOwner::new(c)),
    },
    RuleEntry {
        name: RequireDescription::NAME,
        description: RequireDescription::DESCRIPTION,
        build: |c| Box::new(RequireDescription::new(c)),
    },
    RuleEntry {
        name: RequireDomain::NAME,
        description: RequireDomain::DESCRIPTION,
        build: |c| Box::new(RequireDomain::new(c)),
    },
    RuleEntry {
        name: NoDeprecatedUpstream::NAME,
        description: NoDeprecatedUpstream::DESCRIPTION,
        build: |c| Box::new(NoDeprecatedUpstream::new(c)),
    },
    RuleEntry {
        name: UpstreamMustHaveOwner::NAME,
        description: UpstreamMustHaveOwner::DESCRIPTION,
        build: |c| Box::new(UpstreamMustHaveOwner::new(c)),
    },
    RuleEntry {
        name: RequireTags::NAME,
        description: RequireTags::DESCRIPTION,
        build: |c| Box::new(RequireTags::new(c)),
    },
    RuleEntry {
        name: RequireColumnDescriptions::NAME,
        description: RequireColumnDescriptions::DESCRIPTION,
        build: |c| Box::new(RequireColumnDescriptions::new(c)),
    },
    RuleEntry {
        name: NamingConvention::NAME,
        description: NamingConvention::DESCRIPTION,
        build: |c| Box::new(NamingConvention::new(c)),
    },
    RuleEntry {
        name: RequireMaterialization::NAME,
        description: RequireMaterialization::DESCRIPTION,
        build: |c| Box::new(RequireMaterialization::new(c)),
    },
    RuleEntry {
        name: MaxUpstreamDependencies::NAME,
        description: MaxUpstreamDependencies::DESCRIPTION,
        build: |c| Box::new(MaxUpstreamDependencies::new(c)),
    },
    RuleEntry {
        name: RequirePiiTag::NAME,
        description: RequirePiiTag::DESCRIPTION,
        build: |c| Box::new(RequirePiiTag::new(c)),
    },
];

/// Read-only table of built-in rules.
pub struct RuleRegistry;

impl RuleRegistry {
    pub fn entries() -> &'static [RuleEntry] {
        BUILTIN_RULES
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        BUILTIN_RULES.iter().map(|e| e.name)
    }

    pub fn get(name: &str) -> Option<&'static RuleEntry> {
        BUILTIN_RULES.iter().find(|e| e.name == name)
    }

    /// Enabled rules in configuration order. Unknown names are skipped.
    pub fn instantiate(config: &GovernanceConfig) -> Vec<Box<dyn GovernanceRule>> {
        config
            .enabled_rules()
            .filter_map(|rule_config| match Self::get(&rule_config.name) {
                Some(entry) => Some(entry.build(rule_config)),
                None => {
                    debug!("Ignoring unknown rule '{}'", rule_config.name);
                    None
                }
            })
            .collect()
    }
}
