// steward-core/src/domain/catalog/mod.rs

pub mod status;
pub mod urn;

pub use status::{GovernanceStatus, StatusMap};
pub use urn::{DatasetUrnParts, NameCasing, UrnMapper, parse_urn};
