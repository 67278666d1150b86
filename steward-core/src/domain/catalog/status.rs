// steward-core/src/domain/catalog/status.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statuses fetched for one validation run, keyed by catalog URN.
/// Ordered so that rules scanning every status stay deterministic.
pub type StatusMap = BTreeMap<String, GovernanceStatus>;

/// Governance facts the catalog knows about one dataset.
///
/// When `exists` is false every other fact reads as absent, whatever the raw
/// field says. Rules go through the accessor methods, not the fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GovernanceStatus {
    pub urn: String,
    /// A serialized record describes a dataset that exists unless it says otherwise
    #[serde(default = "default_exists")]
    pub exists: bool,

    #[serde(default)]
    pub owners: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub deprecation_note: Option<String>,
}

fn default_exists() -> bool {
    true
}

impl GovernanceStatus {
    /// Status of a dataset the catalog does not know (or could not be fetched).
    pub fn not_found(urn: impl Into<String>) -> Self {
        Self {
            urn: urn.into(),
            exists: false,
            ..Default::default()
        }
    }

    pub fn found(urn: impl Into<String>) -> Self {
        Self {
            urn: urn.into(),
            exists: true,
            ..Default::default()
        }
    }

    // --- BUILDER ---

    pub fn with_owners<I, S>(mut self, owners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.owners = owners.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn deprecated(mut self, note: Option<&str>) -> Self {
        self.deprecated = true;
        self.deprecation_note = note.map(str::to_string);
        self
    }

    // --- FACTS (gated on existence) ---

    pub fn has_owner(&self) -> bool {
        self.exists && !self.owners.is_empty()
    }

    pub fn has_description(&self) -> bool {
        self.exists
            && self
                .description
                .as_deref()
                .is_some_and(|d| !d.trim().is_empty())
    }

    pub fn has_domain(&self) -> bool {
        self.exists && self.domain.as_deref().is_some_and(|d| !d.is_empty())
    }

    pub fn has_tags(&self) -> bool {
        self.exists && !self.tags.is_empty()
    }

    pub fn is_deprecated(&self) -> bool {
        self.exists && self.deprecated
    }

    pub fn owners(&self) -> &[String] {
        if self.exists { &self.owners } else { &[] }
    }

    pub fn tags(&self) -> &[String] {
        if self.exists { &self.tags } else { &[] }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|_| self.exists)
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref().filter(|_| self.exists)
    }

    pub fn deprecation_note(&self) -> Option<&str> {
        self.deprecation_note
            .as_deref()
            .filter(|_| self.is_deprecated())
    }
}
