pub mod catalog;
pub mod error;
pub mod governance;
pub mod ports;
pub mod project;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
