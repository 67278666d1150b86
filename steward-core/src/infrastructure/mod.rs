// steward-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod config;
pub mod error;
pub mod fs;

// Re-exports pour le CLI
pub use adapters::{DbtManifestLoader, StaticCatalog};
pub use error::InfrastructureError;
