//! Aggregate snapshot and engagement counters.

use std::sync::Arc;

use async_trait::async_trait;

use common::AppResult;
use domain::{AdminStats, TABLE_AD_CONTACTS, TABLE_AD_VIEWS, VIEW_ADMIN_STATS};

use crate::query::Query;
use crate::store::RecordStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Platform-wide snapshot row
    async fn admin_stats(&self) -> AppResult<AdminStats>;

    /// Number of recorded views across the given listings
    async fn count_views(&self, listing_ids: &[String]) -> AppResult<usize>;

    /// Number of recorded contact requests across the given listings
    async fn count_contacts(&self, listing_ids: &[String]) -> AppResult<usize>;
}

pub struct AnalyticsStore {
    store: Arc<dyn RecordStore>,
}

impl AnalyticsStore {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    async fn count(&self, table: &str, listing_ids: &[String]) -> AppResult<usize> {
        if listing_ids.is_empty() {
            return Ok(0);
        }
        let rows = self
            .store
            .select(&Query::from(table).select("id").in_list("ad_id", listing_ids))
            .await?;
        Ok(rows.len())
    }
}

#[async_trait]
impl AnalyticsRepository for AnalyticsStore {
    async fn admin_stats(&self) -> AppResult<AdminStats> {
        let row = self
            .store
            .select_single(&Query::from(VIEW_ADMIN_STATS))
            .await?;
        Ok(serde_json::from_value(row)?)
    }

    async fn count_views(&self, listing_ids: &[String]) -> AppResult<usize> {
        self.count(TABLE_AD_VIEWS, listing_ids).await
    }

    async fn count_contacts(&self, listing_ids: &[String]) -> AppResult<usize> {
        self.count(TABLE_AD_CONTACTS, listing_ids).await
    }
}
