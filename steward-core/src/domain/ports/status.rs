// steward-core/src/domain/ports/status.rs

// Le moteur ne sait pas d'où viennent les statuts (DataHub, snapshot, dry-run):
// il ne voit que ce contrat.

use crate::domain::catalog::{GovernanceStatus, StatusMap};
use crate::domain::error::DomainError;
use async_trait::async_trait;
use futures::future::join_all;
use std::collections::BTreeSet;
use tracing::warn;

#[async_trait]
pub trait GovernanceStatusProvider: Send + Sync {
    /// Connectivity probe. Failures surface as `DomainError::CatalogConnection`.
    async fn test_connection(&self) -> Result<bool, DomainError>;

    /// Direct lookup. May fail; callers decide what to do with the error.
    async fn fetch_status(&self, urn: &str) -> Result<GovernanceStatus, DomainError>;

    /// Best-effort lookup: any failure reads as "dataset not found".
    async fn fetch_one(&self, urn: &str) -> GovernanceStatus {
        match self.fetch_status(urn).await {
            Ok(status) => status,
            Err(e) => {
                warn!("Failed to fetch governance status for {}: {}", urn, e);
                GovernanceStatus::not_found(urn)
            }
        }
    }

    /// One entry per requested URN. Lookups run concurrently.
    async fn fetch_batch(&self, urns: &BTreeSet<String>) -> StatusMap {
        let statuses = join_all(urns.iter().map(|urn| self.fetch_one(urn))).await;
        urns.iter().cloned().zip(statuses).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flaky;

    #[async_trait]
    impl GovernanceStatusProvider for Flaky {
        async fn test_connection(&self) -> Result<bool, DomainError> {
            Err(DomainError::CatalogConnection("refused".into()))
        }

        async fn fetch_status(&self, urn: &str) -> Result<GovernanceStatus, DomainError> {
            if urn.contains("BROKEN") {
                return Err(DomainError::CatalogFetch {
                    urn: urn.to_string(),
                    reason: "timeout".into(),
                });
            }
            Ok(GovernanceStatus::found(urn).with_owners(["urn:li:corpuser:ops"]))
        }
    }

    #[tokio::test]
    async fn test_fetch_one_fails_closed() {
        let status = Flaky.fetch_one("urn:BROKEN").await;
        assert!(!status.exists);
        assert_eq!(status.urn, "urn:BROKEN");
    }

    #[tokio::test]
    async fn test_batch_has_one_entry_per_urn() {
        let urns: BTreeSet<String> = ["urn:A", "urn:BROKEN", "urn:C"]
            .into_iter()
            .map(String::from)
            .collect();
        let statuses = Flaky.fetch_batch(&urns).await;

        assert_eq!(statuses.len(), 3);
        assert!(statuses["urn:A"].has_owner());
        assert!(!statuses["urn:BROKEN"].exists);
        assert!(statuses["urn:C"].exists);
    }

    #[tokio::test]
    async fn test_connection_error_propagates() {
        assert!(matches!(
            Flaky.test_connection().await,
            Err(DomainError::CatalogConnection(_))
        ));
    }
}
