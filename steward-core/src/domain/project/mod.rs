// steward-core/src/domain/project/mod.rs

pub mod manifest;

pub use manifest::{CatalogColumn, ColumnInfo, Model, ModelGraph};
