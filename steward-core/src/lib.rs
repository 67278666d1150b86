// steward-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)] // On autorise le manque de doc pour le moment

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Domain (Cœur du métier)
// Model graph, catalog identifiers, governance rules, report, ports.
// Ne dépend de RIEN d'autre (ni infra, ni app).
pub mod domain;

// 2. Infrastructure (Adapters)
// dbt artifacts, catalog providers, config files.
// Dépend du Domain et des Ports.
pub mod infrastructure;

// 3. Application (Use Cases)
// Governance engine orchestration.
// Dépend du Domain et des Ports.
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use steward_core::StewardError;
pub use error::StewardError;
