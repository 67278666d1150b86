// steward-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StewardError {
    // --- ERREURS DU DOMAINE (Rules, Catalog, Selection) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing, Config) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

impl From<std::io::Error> for StewardError {
    fn from(err: std::io::Error) -> Self {
        StewardError::Infrastructure(InfrastructureError::Io(err))
    }
}
