//! Write-through persistence boundary for feed records.
//!
//! Every fetch pipeline persists what it parsed before reading the full set
//! back, so the mirror is the authoritative snapshot a feed serves from.
//! The boundary is deliberately narrow: submit one record, read them all.
//! Each feed owns its own partition; there is no cross-feed state.

use std::future::Future;

use tokio::sync::RwLock;

use crate::api::MirrorError;
use crate::models::Keyed;

/// Per-feed persistence boundary.
///
/// `submit` failures are non-fatal to callers by contract; the pipeline
/// logs and continues. `get_all` returns records in insertion order;
/// feed-specific ordering is applied by the feed itself.
pub trait Mirror<T>: Send + Sync + 'static {
    fn submit(&self, record: &T) -> impl Future<Output = Result<(), MirrorError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<T>, MirrorError>> + Send;
}

/// Memory-resident mirror, the default transport.
///
/// Records are upserted by their [`Keyed`] identity so repeated submissions
/// of a snapshot replace rather than duplicate. Reads and writes from
/// different feeds never contend - each feed holds its own instance.
#[derive(Debug, Default)]
pub struct MemoryMirror<T> {
    records: RwLock<Vec<T>>,
}

impl<T> MemoryMirror<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Drop every record, as an external operator clearing the store would.
    /// The next fetch pipeline re-seeds it.
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<T> Mirror<T> for MemoryMirror<T>
where
    T: Keyed + Clone + Send + Sync + 'static,
{
    async fn submit(&self, record: &T) -> Result<(), MirrorError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|existing| existing.key() == record.key()) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<T>, MirrorError> {
        Ok(self.records.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BusinessMetric;

    #[tokio::test]
    async fn test_submit_preserves_insertion_order() {
        let mirror = MemoryMirror::new();
        mirror
            .submit(&BusinessMetric::new("Revenue", 1.0, "first"))
            .await
            .unwrap();
        mirror
            .submit(&BusinessMetric::new("Expenses", 2.0, "second"))
            .await
            .unwrap();

        let all = mirror.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Revenue");
        assert_eq!(all[1].name, "Expenses");
    }

    #[tokio::test]
    async fn test_submit_upserts_by_key() {
        let mirror = MemoryMirror::new();
        mirror
            .submit(&BusinessMetric::new("Revenue", 1.0, "stale"))
            .await
            .unwrap();
        mirror
            .submit(&BusinessMetric::new("Revenue", 9.0, "updated"))
            .await
            .unwrap();

        let all = mirror.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].amount, 9.0);
        assert_eq!(all[0].description, "updated");
    }

    #[tokio::test]
    async fn test_clear_empties_store() {
        let mirror = MemoryMirror::new();
        mirror
            .submit(&BusinessMetric::new("Revenue", 1.0, ""))
            .await
            .unwrap();
        assert!(!mirror.is_empty().await);

        mirror.clear().await;
        assert!(mirror.is_empty().await);
    }
}
