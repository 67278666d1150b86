// steward-core/src/domain/ports/mod.rs

pub mod manifest;
pub mod status;

pub use manifest::ManifestLoader;
pub use status::GovernanceStatusProvider;
