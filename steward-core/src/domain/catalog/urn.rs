// steward-core/src/domain/catalog/urn.rs
//
// dbt model -> catalog dataset URN.
// urn:li:dataset:(urn:li:dataPlatform:{platform},{[instance.]name},{env})

use crate::domain::project::Model;
use regex::Regex;
use std::sync::LazyLock;

/// How a storage engine folds identifiers in its catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCasing {
    Upper,
    Lower,
    Preserve,
}

impl NameCasing {
    pub fn apply(&self, name: &str) -> String {
        match self {
            Self::Upper => name.to_uppercase(),
            Self::Lower => name.to_lowercase(),
            Self::Preserve => name.to_string(),
        }
    }
}

// Platforms absent from this table keep identifiers as written.
const PLATFORM_CASING: &[(&str, NameCasing)] = &[
    ("snowflake", NameCasing::Upper),
    ("postgres", NameCasing::Lower),
    ("mysql", NameCasing::Lower),
];

pub fn casing_for(platform: &str) -> NameCasing {
    PLATFORM_CASING
        .iter()
        .find(|(p, _)| p.eq_ignore_ascii_case(platform))
        .map(|(_, casing)| *casing)
        .unwrap_or(NameCasing::Preserve)
}

#[derive(Debug, Clone)]
pub struct UrnMapper {
    platform: String,
    env: String,
    platform_instance: Option<String>,
    database_override: Option<String>,
    schema_override: Option<String>,
    casing: NameCasing,
}

impl UrnMapper {
    pub fn new(platform: &str, env: &str) -> Self {
        let platform = platform.to_lowercase();
        Self {
            casing: casing_for(&platform),
            platform,
            env: env.to_string(),
            platform_instance: None,
            database_override: None,
            schema_override: None,
        }
    }

    pub fn with_platform_instance(mut self, instance: Option<&str>) -> Self {
        self.platform_instance = non_empty(instance);
        self
    }

    pub fn with_database_override(mut self, database: Option<&str>) -> Self {
        self.database_override = non_empty(database);
        self
    }

    pub fn with_schema_override(mut self, schema: Option<&str>) -> Self {
        self.schema_override = non_empty(schema);
        self
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    /// Dotted dataset name as the catalog stores it.
    pub fn dataset_name(&self, model: &Model) -> String {
        let database = self
            .database_override
            .as_deref()
            .or(model.database.as_deref().filter(|d| !d.is_empty()))
            .unwrap_or("");
        let schema = self.schema_override.as_deref().unwrap_or(&model.schema);

        let schema = self.casing.apply(schema);
        let name = self.casing.apply(&model.name);

        if database.is_empty() {
            format!("{}.{}", schema, name)
        } else {
            format!("{}.{}.{}", self.casing.apply(database), schema, name)
        }
    }

    pub fn model_to_urn(&self, model: &Model) -> String {
        self.build_urn(&self.dataset_name(model))
    }

    /// Sources have no Model record, so schema/database come in explicitly.
    pub fn source_to_urn(
        &self,
        source_name: &str,
        source_database: Option<&str>,
        source_schema: Option<&str>,
    ) -> String {
        let database = non_empty(source_database)
            .or_else(|| self.database_override.clone())
            .map(|d| self.casing.apply(&d));
        let schema = non_empty(source_schema)
            .or_else(|| self.schema_override.clone())
            .map(|s| self.casing.apply(&s));
        let name = self.casing.apply(source_name);

        let dataset_name = match (database, schema) {
            (Some(db), Some(schema)) => format!("{}.{}.{}", db, schema, name),
            (_, Some(schema)) => format!("{}.{}", schema, name),
            _ => name,
        };

        self.build_urn(&dataset_name)
    }

    pub fn build_urn(&self, dataset_name: &str) -> String {
        match self.platform_instance.as_deref() {
            Some(instance) => format!(
                "urn:li:dataset:(urn:li:dataPlatform:{},{}.{},{})",
                self.platform, instance, dataset_name, self.env
            ),
            None => format!(
                "urn:li:dataset:(urn:li:dataPlatform:{},{},{})",
                self.platform, dataset_name, self.env
            ),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Components recovered from a dataset URN. All empty when the input does not match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetUrnParts {
    pub platform: String,
    pub name: String,
    pub env: String,
}

impl DatasetUrnParts {
    pub fn is_empty(&self) -> bool {
        self.platform.is_empty() && self.name.is_empty() && self.env.is_empty()
    }
}

static DATASET_URN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^urn:li:dataset:\(urn:li:dataPlatform:([^,]+),([^,]+),([^)]+)\)").ok()
});

/// Inverse of [`UrnMapper::build_urn`]. Never fails.
pub fn parse_urn(urn: &str) -> DatasetUrnParts {
    DATASET_URN
        .as_ref()
        .and_then(|re| re.captures(urn))
        .map(|caps| DatasetUrnParts {
            platform: caps[1].to_string(),
            name: caps[2].to_string(),
            env: caps[3].to_string(),
        })
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dim_customers() -> Model {
        Model {
            unique_id: "model.shop.dim_customers".into(),
            name: "dim_customers".into(),
            database: Some("analytics_db".into()),
            schema: "marts".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_snowflake_uppercases() {
        let mapper = UrnMapper::new("Snowflake", "PROD");
        assert_eq!(
            mapper.model_to_urn(&dim_customers()),
            "urn:li:dataset:(urn:li:dataPlatform:snowflake,ANALYTICS_DB.MARTS.DIM_CUSTOMERS,PROD)"
        );
    }

    #[test]
    fn test_postgres_lowercases() {
        let mut model = dim_customers();
        model.name = "Dim_Customers".into();
        model.schema = "MARTS".into();
        let mapper = UrnMapper::new("postgres", "PROD");
        assert_eq!(
            mapper.dataset_name(&model),
            "analytics_db.marts.dim_customers"
        );
    }

    #[test]
    fn test_other_platforms_preserve_case() {
        let mut model = dim_customers();
        model.name = "Dim_Customers".into();
        let mapper = UrnMapper::new("bigquery", "DEV");
        assert_eq!(mapper.dataset_name(&model), "analytics_db.marts.Dim_Customers");
        assert_eq!(
            mapper.build_urn("project.dataset.table"),
            "urn:li:dataset:(urn:li:dataPlatform:bigquery,project.dataset.table,DEV)"
        );
    }

    #[test]
    fn test_without_database() {
        let mut model = dim_customers();
        model.database = None;
        let mapper = UrnMapper::new("snowflake", "PROD");
        assert_eq!(mapper.dataset_name(&model), "MARTS.DIM_CUSTOMERS");

        model.database = Some(String::new());
        assert_eq!(mapper.dataset_name(&model), "MARTS.DIM_CUSTOMERS");
    }

    #[test]
    fn test_overrides() {
        let mapper = UrnMapper::new("snowflake", "PROD")
            .with_database_override(Some("other_db"))
            .with_schema_override(Some("other_schema"));
        assert_eq!(
            mapper.dataset_name(&dim_customers()),
            "OTHER_DB.OTHER_SCHEMA.DIM_CUSTOMERS"
        );
    }

    #[test]
    fn test_platform_instance_prefixes_name() {
        let mapper =
            UrnMapper::new("snowflake", "PROD").with_platform_instance(Some("my_account"));
        assert_eq!(
            mapper.build_urn("DB.SCHEMA.TABLE"),
            "urn:li:dataset:(urn:li:dataPlatform:snowflake,my_account.DB.SCHEMA.TABLE,PROD)"
        );

        let blank = UrnMapper::new("snowflake", "PROD").with_platform_instance(Some(""));
        assert_eq!(
            blank.build_urn("DB.SCHEMA.TABLE"),
            "urn:li:dataset:(urn:li:dataPlatform:snowflake,DB.SCHEMA.TABLE,PROD)"
        );
    }

    #[test]
    fn test_source_to_urn() {
        let mapper = UrnMapper::new("snowflake", "PROD");
        assert_eq!(
            mapper.source_to_urn("customers", Some("raw_db"), Some("raw")),
            "urn:li:dataset:(urn:li:dataPlatform:snowflake,RAW_DB.RAW.CUSTOMERS,PROD)"
        );
        assert_eq!(
            mapper.source_to_urn("customers", None, Some("raw")),
            "urn:li:dataset:(urn:li:dataPlatform:snowflake,RAW.CUSTOMERS,PROD)"
        );
        assert_eq!(
            mapper.source_to_urn("customers", Some("raw_db"), None),
            "urn:li:dataset:(urn:li:dataPlatform:snowflake,CUSTOMERS,PROD)"
        );
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let mapper = UrnMapper::new("snowflake", "PROD").with_platform_instance(Some("acct"));
        let model = dim_customers();
        assert_eq!(mapper.model_to_urn(&model), mapper.model_to_urn(&model));
    }

    #[test]
    fn test_parse_round_trip() {
        let mapper = UrnMapper::new("snowflake", "PROD");
        let urn = mapper.build_urn("ANALYTICS_DB.MARTS.DIM_CUSTOMERS");
        let parts = parse_urn(&urn);
        assert_eq!(
            parts,
            DatasetUrnParts {
                platform: "snowflake".into(),
                name: "ANALYTICS_DB.MARTS.DIM_CUSTOMERS".into(),
                env: "PROD".into(),
            }
        );
    }

    #[test]
    fn test_parse_garbage_returns_empty() {
        assert!(parse_urn("not-a-urn").is_empty());
        assert!(parse_urn("").is_empty());
        assert!(parse_urn("urn:li:corpuser:john.doe").is_empty());
    }
}
