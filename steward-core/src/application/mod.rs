// steward-core/src/application/mod.rs

pub mod governance;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Le CLI fait simplement `use steward_core::application::GovernanceEngine;`
pub use governance::GovernanceEngine;
