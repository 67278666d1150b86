// steward-core/src/infrastructure/adapters/static_catalog.rs

use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::catalog::{GovernanceStatus, UrnMapper};
use crate::domain::error::DomainError;
use crate::domain::ports::GovernanceStatusProvider;
use crate::domain::project::ModelGraph;
use crate::infrastructure::error::InfrastructureError;

pub const DRY_RUN_OWNER: &str = "urn:li:corpuser:dry-run-owner";

/// In-memory catalog: a fixed map of URN to governance status.
///
/// Backs snapshot files exported from the catalog and the `--dry-run` mode.
/// Unknown URNs read as "not found".
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    label: String,
    datasets: HashMap<String, GovernanceStatus>,
}

impl StaticCatalog {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            datasets: HashMap::new(),
        }
    }

    /// Replaces any previous status recorded for the same URN.
    pub fn add_dataset(&mut self, status: GovernanceStatus) {
        self.datasets.insert(status.urn.clone(), status);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Loads a list of status records. `.json` files are read as JSON,
    /// anything else as YAML.
    #[instrument]
    pub fn from_snapshot(path: &Path) -> Result<Self, InfrastructureError> {
        if !path.exists() {
            return Err(InfrastructureError::SnapshotNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let records: Vec<GovernanceStatus> = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        let mut catalog = Self::new(format!("snapshot {}", path.display()));
        for record in records {
            catalog.add_dataset(record);
        }
        info!("Loaded {} datasets from catalog snapshot", catalog.len());
        Ok(catalog)
    }

    /// Every model exists and is owned. Description and tags come from dbt.
    pub fn dry_run(graph: &ModelGraph, mapper: &UrnMapper) -> Self {
        let mut catalog = Self::new("dry-run");
        for model in graph.models() {
            let mut status = GovernanceStatus::found(mapper.model_to_urn(model))
                .with_owners([DRY_RUN_OWNER])
                .with_tags(model.tags.iter().map(|t| format!("urn:li:tag:{}", t)));
            if let Some(description) = &model.description {
                status = status.with_description(description.as_str());
            }
            catalog.add_dataset(status);
        }
        catalog
    }
}

#[async_trait]
impl GovernanceStatusProvider for StaticCatalog {
    async fn test_connection(&self) -> Result<bool, DomainError> {
        Ok(true)
    }

    async fn fetch_status(&self, urn: &str) -> Result<GovernanceStatus, DomainError> {
        Ok(self
            .datasets
            .get(urn)
            .cloned()
            .unwrap_or_else(|| GovernanceStatus::not_found(urn)))
    }
}
