// steward-core/src/infrastructure/adapters/dbt_manifest.rs
//
// Object order in the artifacts is meaningful (models, columns): serde_json
// is built with `preserve_order`, so `Map` keeps document order.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::domain::ports::ManifestLoader;
use crate::domain::project::{CatalogColumn, ColumnInfo, Model, ModelGraph};
use crate::error::StewardError;
use crate::infrastructure::error::InfrastructureError;

/// Reads dbt's `manifest.json`, optionally enriched with `catalog.json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DbtManifestLoader;

impl ManifestLoader for DbtManifestLoader {
    #[instrument(skip(self))]
    fn load(
        &self,
        manifest_path: &Path,
        catalog_path: Option<&Path>,
    ) -> Result<ModelGraph, StewardError> {
        let raw: RawManifest = read_json(manifest_path)?;

        let mut models = Vec::new();
        for (node_id, node) in raw.nodes {
            if node.get("resource_type").and_then(Value::as_str) != Some("model") {
                continue;
            }
            // Un nœud illisible est ignoré, pas fatal
            match serde_json::from_value::<RawNode>(node) {
                Ok(raw_node) => {
                    debug!("Parsed model: {}", raw_node.name);
                    models.push(raw_node.into_model(node_id));
                }
                Err(e) => warn!("Failed to parse node {}: {}", node_id, e),
            }
        }

        let mut graph = ModelGraph::new(models, raw.sources, raw.metadata);
        info!(
            "Parsed manifest with {} models and {} sources (dbt {})",
            graph.model_count(),
            graph.sources.len(),
            graph.dbt_version
        );

        if let Some(catalog_path) = catalog_path {
            if catalog_path.exists() {
                let mut catalog: RawCatalog = read_json(catalog_path)?;
                for model in graph.models_mut() {
                    if let Some(node) = catalog.nodes.remove(&model.unique_id) {
                        let columns = node.into_columns(&model.unique_id);
                        model.merge_catalog_columns(columns);
                    }
                }
            } else {
                warn!(path = ?catalog_path, "Catalog file not found, skipping column merge");
            }
        }

        Ok(graph)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, InfrastructureError> {
    let manifest_error = |reason: String| InfrastructureError::ManifestError {
        path: path.display().to_string(),
        reason,
    };

    if !path.exists() {
        return Err(manifest_error("file not found".to_string()));
    }
    let content = fs::read_to_string(path)
        .map_err(|e| manifest_error(format!("error reading file: {}", e)))?;
    serde_json::from_str(&content).map_err(|e| manifest_error(format!("invalid JSON: {}", e)))
}

/// Typed entries of a column map, in document order. Malformed entries are skipped.
fn typed_entries<'a, T: DeserializeOwned>(
    owner: &'a str,
    entries: Map<String, Value>,
) -> impl Iterator<Item = (String, T)> + 'a {
    entries
        .into_iter()
        .filter_map(move |(key, value)| match serde_json::from_value::<T>(value) {
            Ok(typed) => Some((key, typed)),
            Err(e) => {
                warn!("Skipping column {} of {}: {}", key, owner, e);
                None
            }
        })
}

// --- RAW ARTIFACT SHAPES ---

#[derive(Deserialize)]
struct RawManifest {
    #[serde(default)]
    metadata: Map<String, Value>,
    #[serde(default)]
    nodes: Map<String, Value>,
    #[serde(default)]
    sources: BTreeMap<String, Value>,
}

#[derive(Deserialize)]
struct RawNode {
    name: String,
    #[serde(default)]
    database: Option<String>,
    #[serde(default)]
    schema: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    resource_type: String,
    #[serde(default)]
    package_name: String,
    #[serde(default)]
    path: String,
    #[serde(default)]
    original_file_path: String,
    #[serde(default)]
    depends_on: RawDependsOn,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    meta: Map<String, Value>,
    #[serde(default)]
    columns: Map<String, Value>,
    #[serde(default)]
    config: Map<String, Value>,
}

#[derive(Deserialize, Default)]
struct RawDependsOn {
    #[serde(default)]
    nodes: Vec<String>,
}

#[derive(Deserialize)]
struct RawColumn {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    data_type: Option<String>,
    #[serde(default)]
    meta: Map<String, Value>,
}

impl RawNode {
    fn into_model(self, unique_id: String) -> Model {
        let columns = typed_entries::<RawColumn>(&unique_id, self.columns)
            .map(|(key, col)| ColumnInfo {
                name: col.name.filter(|n| !n.is_empty()).unwrap_or(key),
                description: col.description.unwrap_or_default(),
                data_type: col.data_type,
                comment: None,
                meta: col.meta,
            })
            .collect();

        Model {
            unique_id,
            name: self.name,
            database: self.database,
            schema: self.schema.unwrap_or_default(),
            description: self.description,
            resource_type: self.resource_type,
            package_name: self.package_name,
            path: self.path,
            original_file_path: self.original_file_path,
            depends_on: self.depends_on.nodes,
            tags: self.tags,
            meta: self.meta,
            columns,
            config: self.config,
        }
    }
}

#[derive(Deserialize)]
struct RawCatalog {
    #[serde(default)]
    nodes: BTreeMap<String, RawCatalogNode>,
}

#[derive(Deserialize)]
struct RawCatalogNode {
    #[serde(default)]
    columns: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawCatalogColumn {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type")]
    data_type: Option<String>,
    #[serde(default)]
    comment: Option<String>,
}

impl RawCatalogNode {
    fn into_columns(self, unique_id: &str) -> Vec<CatalogColumn> {
        typed_entries::<RawCatalogColumn>(unique_id, self.columns)
            .map(|(key, col)| CatalogColumn {
                name: col.name.unwrap_or(key),
                data_type: col.data_type,
                comment: col.comment,
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;
    use tempfile::tempdir;

    // Texte brut: l'ordre des clés (non trié) fait partie du test
    const MANIFEST: &str = r#"{
  "metadata": { "dbt_version": "1.7.4" },
  "nodes": {
    "model.shop.stg_orders": {
      "name": "stg_orders",
      "resource_type": "model",
      "database": "analytics",
      "schema": "staging",
      "path": "staging/stg_orders.sql",
      "depends_on": { "nodes": ["source.shop.raw.orders"] },
      "config": { "materialized": "view" }
    },
    "model.shop.dim_customers": {
      "name": "dim_customers",
      "resource_type": "model",
      "database": "analytics",
      "schema": "marts",
      "description": "One row per customer",
      "tags": ["core"],
      "columns": {
        "id": { "name": "id", "description": "Primary key" },
        "email": { "name": "email", "meta": { "pii": true } },
        "age": { "name": "age", "description": "" },
        "zip": { "name": "zip", "description": 42 },
        "country": { "name": "country", "description": "ISO code" }
      },
      "depends_on": { "nodes": ["model.shop.stg_orders"] }
    },
    "test.shop.not_null_id": {
      "name": "not_null_id",
      "resource_type": "test"
    },
    "model.shop.broken": {
      "resource_type": "model",
      "tags": "oops"
    }
  },
  "sources": {
    "source.shop.raw.orders": { "name": "orders", "schema": "raw" }
  }
}"#;

    fn write_text(dir: &Path, name: &str, text: &str) -> Result<std::path::PathBuf> {
        let path = dir.join(name);
        fs::write(&path, text)?;
        Ok(path)
    }

    fn write(dir: &Path, name: &str, value: &Value) -> Result<std::path::PathBuf> {
        write_text(dir, name, &serde_json::to_string_pretty(value)?)
    }

    #[test]
    fn test_load_keeps_models_in_order() -> Result<()> {
        let dir = tempdir()?;
        let path = write_text(dir.path(), "manifest.json", MANIFEST)?;

        let graph = DbtManifestLoader.load(&path, None)?;

        // Les tests et les nœuds invalides sont ignorés
        assert_eq!(graph.model_names(), vec!["stg_orders", "dim_customers"]);
        assert_eq!(graph.dbt_version, "1.7.4");
        assert_eq!(graph.sources.len(), 1);

        let dim = graph.get_model("model.shop.dim_customers").unwrap();
        // 'zip' est illisible (description numérique) et ignoré
        let columns: Vec<&str> = dim.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(columns, vec!["id", "email", "age", "country"]);
        assert!(dim.column("email").unwrap().is_flagged_as_pii());
        assert_eq!(dim.full_name(), "analytics.marts.dim_customers");

        let upstream: Vec<&str> = graph.upstream_models(dim).map(|m| m.name.as_str()).collect();
        assert_eq!(upstream, vec!["stg_orders"]);
        Ok(())
    }

    #[test]
    fn test_reverse_alphabetical_order_survives() -> Result<()> {
        let dir = tempdir()?;
        let path = write_text(
            dir.path(),
            "manifest.json",
            r#"{"nodes":{
                "model.s.zeta":{"name":"zeta","resource_type":"model","schema":"s",
                    "columns":{"b":{},"a":{}}},
                "model.s.alpha":{"name":"alpha","resource_type":"model","schema":"s"}
            }}"#,
        )?;

        let graph = DbtManifestLoader.load(&path, None)?;

        assert_eq!(graph.model_names(), vec!["zeta", "alpha"]);
        let zeta = graph.get_model_by_name("zeta").unwrap();
        let columns: Vec<&str> = zeta.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(columns, vec!["b", "a"]);
        Ok(())
    }

    #[test]
    fn test_catalog_merge_never_overwrites() -> Result<()> {
        let dir = tempdir()?;
        let manifest_path = write_text(dir.path(), "manifest.json", MANIFEST)?;
        let catalog_path = write_text(
            dir.path(),
            "catalog.json",
            r#"{"nodes": {"model.shop.dim_customers": {"columns": {
                "ID": { "name": "id", "type": "NUMBER", "comment": "Overwritten?" },
                "AGE": { "name": "age", "type": "NUMBER", "comment": "Age in years" },
                "CREATED_AT": { "name": "created_at", "type": "TIMESTAMP" },
                "UPDATED_AT": { "name": "updated_at", "type": "TIMESTAMP" }
            }}}}"#,
        )?;

        let graph = DbtManifestLoader.load(&manifest_path, Some(&catalog_path))?;
        let dim = graph.get_model_by_name("dim_customers").unwrap();

        let id = dim.column("id").unwrap();
        assert_eq!(id.description, "Primary key");
        assert_eq!(id.data_type.as_deref(), Some("NUMBER"));

        let age = dim.column("age").unwrap();
        assert_eq!(age.description, "");
        assert_eq!(age.comment.as_deref(), Some("Age in years"));

        let columns: Vec<&str> = dim.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            columns,
            vec!["id", "email", "age", "country", "created_at", "updated_at"]
        );
        Ok(())
    }

    #[test]
    fn test_missing_catalog_is_skipped() -> Result<()> {
        let dir = tempdir()?;
        let manifest_path = write_text(dir.path(), "manifest.json", MANIFEST)?;
        let graph = DbtManifestLoader.load(&manifest_path, Some(&dir.path().join("catalog.json")))?;
        assert_eq!(graph.model_count(), 2);
        Ok(())
    }

    #[test]
    fn test_defaults_and_errors() -> Result<()> {
        let dir = tempdir()?;

        let bare = write(dir.path(), "bare.json", &json!({ "nodes": {} }))?;
        let graph = DbtManifestLoader.load(&bare, None)?;
        assert_eq!(graph.dbt_version, "unknown");
        assert_eq!(graph.model_count(), 0);

        let missing = DbtManifestLoader.load(&dir.path().join("nope.json"), None);
        assert!(missing.unwrap_err().to_string().contains("file not found"));

        let garbage = dir.path().join("garbage.json");
        fs::write(&garbage, "{ not json")?;
        let err = DbtManifestLoader.load(&garbage, None).unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));

        let wrong_shape = write(dir.path(), "list.json", &json!([1, 2, 3]))?;
        assert!(DbtManifestLoader.load(&wrong_shape, None).is_err());
        Ok(())
    }
}
