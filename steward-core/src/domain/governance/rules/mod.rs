// steward-core/src/domain/governance/rules/mod.rs

pub mod conventions;
pub mod documentation;
pub mod lineage;
pub mod ownership;
pub mod privacy;

pub use conventions::{NamingConvention, RequireMaterialization};
pub use documentation::{RequireColumnDescriptions, RequireDescription, RequireTags};
pub use lineage::{MaxUpstreamDependencies, NoDeprecatedUpstream, UpstreamMustHaveOwner};
pub use ownership::{RequireDomain, RequireOwner};
pub use privacy::RequirePiiTag;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::catalog::{GovernanceStatus, StatusMap};
    use crate::domain::project::{ColumnInfo, Model, ModelGraph};
    use serde_json::{Map, Value};

    pub fn model(name: &str) -> Model {
        Model {
            unique_id: format!("model.shop.{}", name),
            name: name.to_string(),
            database: Some("analytics_db".to_string()),
            schema: "marts".to_string(),
            resource_type: "model".to_string(),
            package_name: "shop".to_string(),
            path: format!("marts/{}.sql", name),
            original_file_path: format!("models/marts/{}.sql", name),
            ..Default::default()
        }
    }

    pub fn column(name: &str, description: &str) -> ColumnInfo {
        ColumnInfo {
            name: name.to_string(),
            description: description.to_string(),
            data_type: None,
            comment: None,
            meta: Map::new(),
        }
    }

    pub fn with_deps(mut model: Model, deps: &[&str]) -> Model {
        model.depends_on = deps.iter().map(|d| format!("model.shop.{}", d)).collect();
        model
    }

    pub fn with_config(mut model: Model, key: &str, value: Value) -> Model {
        model.config.insert(key.to_string(), value);
        model
    }

    pub fn graph(models: &[Model]) -> ModelGraph {
        ModelGraph::from_models(models.to_vec())
    }

    pub fn urn(name: &str) -> String {
        format!(
            "urn:li:dataset:(urn:li:dataPlatform:snowflake,ANALYTICS_DB.MARTS.{},PROD)",
            name.to_uppercase()
        )
    }

    pub fn statuses(entries: Vec<GovernanceStatus>) -> StatusMap {
        entries.into_iter().map(|s| (s.urn.clone(), s)).collect()
    }
}
