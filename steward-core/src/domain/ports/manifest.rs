// steward-core/src/domain/ports/manifest.rs

use crate::domain::project::ModelGraph;
use crate::error::StewardError;
use std::path::Path;

/// Source of the model graph. Malformed input is an error, never a partial graph.
pub trait ManifestLoader: Send + Sync {
    fn load(&self, manifest_path: &Path, catalog_path: Option<&Path>)
    -> Result<ModelGraph, StewardError>;
}
