// steward-core/src/domain/project/manifest.rs

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// A dbt model: one node of the dependency graph.
#[derive(Debug, Serialize, Clone, Default)]
pub struct Model {
    /// Stable join key across the graph and the status map (ex: "model.shop.dim_customers")
    pub unique_id: String,
    pub name: String,
    pub database: Option<String>,
    pub schema: String,
    pub description: Option<String>,
    pub resource_type: String,
    pub package_name: String,
    pub path: String,
    pub original_file_path: String,

    /// Upstream references. The model does not own them.
    pub depends_on: Vec<String>,

    pub tags: Vec<String>,

    pub meta: Map<String, Value>,

    /// Declared columns, in manifest order
    pub columns: Vec<ColumnInfo>,

    pub config: Map<String, Value>,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct ColumnInfo {
    pub name: String,

    pub description: String,

    pub data_type: Option<String>,

    /// Warehouse comment from catalog.json. Not a dbt description.
    pub comment: Option<String>,

    pub meta: Map<String, Value>,
}

/// Column facts coming from the warehouse catalog (catalog.json).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogColumn {
    pub name: String,
    pub data_type: Option<String>,
    pub comment: Option<String>,
}

impl Model {
    /// `database.schema.name`, or `schema.name` when the database is unknown.
    pub fn full_name(&self) -> String {
        match self.database.as_deref() {
            Some(db) if !db.is_empty() => format!("{}.{}.{}", db, self.schema, self.name),
            _ => format!("{}.{}", self.schema, self.name),
        }
    }

    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }

    /// Value of the `materialized` config key, when set to a non-empty string.
    pub fn materialization(&self) -> Option<&str> {
        self.config
            .get("materialized")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
    }

    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Late-fill column metadata from the warehouse catalog.
    /// Unknown columns are appended; known ones only get their empty fields filled.
    /// Descriptions stay dbt-only: warehouse comments land in `comment`.
    pub fn merge_catalog_columns(&mut self, catalog_columns: Vec<CatalogColumn>) {
        for cat_col in catalog_columns {
            match self.columns.iter_mut().find(|c| c.name == cat_col.name) {
                Some(existing) => {
                    if existing.data_type.as_deref().is_none_or(str::is_empty) {
                        if let Some(dt) = cat_col.data_type {
                            existing.data_type = Some(dt);
                        }
                    }
                    if existing.comment.as_deref().is_none_or(str::is_empty) {
                        existing.comment = cat_col.comment;
                    }
                }
                None => self.columns.push(ColumnInfo {
                    name: cat_col.name,
                    description: String::new(),
                    data_type: cat_col.data_type,
                    comment: cat_col.comment,
                    meta: Map::new(),
                }),
            }
        }
    }
}

impl ColumnInfo {
    pub fn is_documented(&self) -> bool {
        !self.description.trim().is_empty()
    }

    /// Explicit `meta: { pii: true }` flag on the column.
    pub fn is_flagged_as_pii(&self) -> bool {
        match self.meta.get("pii") {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
            Some(Value::Null) | None => false,
        }
    }
}

/// The parsed project: models indexed by unique id, in manifest order.
/// Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct ModelGraph {
    models: Vec<Model>,
    index: HashMap<String, usize>,

    /// Raw source definitions (unvalidated)
    pub sources: BTreeMap<String, Value>,
    pub metadata: Map<String, Value>,
    pub dbt_version: String,
}

impl ModelGraph {
    pub fn new(
        models: Vec<Model>,
        sources: BTreeMap<String, Value>,
        metadata: Map<String, Value>,
    ) -> Self {
        let dbt_version = metadata
            .get("dbt_version")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();

        let mut graph = Self {
            models: Vec::with_capacity(models.len()),
            index: HashMap::with_capacity(models.len()),
            sources,
            metadata,
            dbt_version,
        };
        for model in models {
            // Last definition wins on duplicated ids, position is kept
            match graph.index.get(&model.unique_id) {
                Some(&pos) => graph.models[pos] = model,
                None => {
                    graph.index.insert(model.unique_id.clone(), graph.models.len());
                    graph.models.push(model);
                }
            }
        }
        graph
    }

    pub fn from_models(models: Vec<Model>) -> Self {
        Self::new(models, BTreeMap::new(), Map::new())
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.iter()
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn get_model(&self, unique_id: &str) -> Option<&Model> {
        self.index.get(unique_id).map(|&pos| &self.models[pos])
    }

    /// Exact name match, first in manifest order.
    pub fn get_model_by_name(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Direct upstream models. Unresolved ids and non-model nodes are skipped.
    pub fn upstream_models<'a>(&'a self, model: &'a Model) -> impl Iterator<Item = &'a Model> {
        model
            .depends_on
            .iter()
            .filter(|dep_id| dep_id.starts_with("model."))
            .filter_map(|dep_id| self.get_model(dep_id))
    }

    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }

    pub(crate) fn models_mut(&mut self) -> impl Iterator<Item = &mut Model> {
        self.models.iter_mut()
    }
}
