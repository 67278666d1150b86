// steward-core/src/infrastructure/adapters/mod.rs

pub mod dbt_manifest;
pub mod static_catalog;

pub use dbt_manifest::DbtManifestLoader;
pub use static_catalog::StaticCatalog;
