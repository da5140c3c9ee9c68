//! Listings (`ads` table) with the seller embedded through its foreign key.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::debug;

use common::AppResult;
use domain::{Listing, ListingStatus, NewListing, ADS_SELLER_FK, TABLE_ADS, TABLE_USERS};

use super::decode_rows;
use crate::query::Query;
use crate::store::RecordStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Listing repository trait for dependency injection.
///
/// Every list is ordered newest first.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Publicly visible listings (`active`, or legacy `approved`)
    async fn list_active(&self) -> AppResult<Vec<Listing>>;

    /// Every listing regardless of status
    async fn list_all(&self) -> AppResult<Vec<Listing>>;

    async fn list_by_seller(&self, seller_id: &str) -> AppResult<Vec<Listing>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Listing>;

    async fn create(
        &self,
        seller_id: &str,
        listing: NewListing,
        status: ListingStatus,
    ) -> AppResult<()>;

    async fn set_status(&self, id: &str, status: ListingStatus) -> AppResult<()>;

    async fn delete(&self, id: &str) -> AppResult<()>;

    /// Delete only if the row still belongs to `seller_id`
    async fn delete_owned(&self, id: &str, seller_id: &str) -> AppResult<()>;
}

/// Concrete implementation of ListingRepository
pub struct ListingStore {
    store: Arc<dyn RecordStore>,
}

impl ListingStore {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    fn joined() -> Query {
        Query::from(TABLE_ADS).embed("seller", TABLE_USERS, ADS_SELLER_FK, "full_name,email")
    }

    async fn fetch(&self, query: Query) -> AppResult<Vec<Listing>> {
        let rows = self.store.select(&query.newest_first()).await?;
        debug!(count = rows.len(), "Fetched listings");
        decode_rows(rows)
    }
}

#[async_trait]
impl ListingRepository for ListingStore {
    async fn list_active(&self) -> AppResult<Vec<Listing>> {
        self.fetch(Self::joined().in_list("status", &["active", "approved"]))
            .await
    }

    async fn list_all(&self) -> AppResult<Vec<Listing>> {
        self.fetch(Self::joined()).await
    }

    async fn list_by_seller(&self, seller_id: &str) -> AppResult<Vec<Listing>> {
        self.fetch(Query::from(TABLE_ADS).eq("seller_id", seller_id))
            .await
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Listing> {
        let row = self
            .store
            .select_single(&Self::joined().eq("id", id))
            .await?;
        Ok(serde_json::from_value(row)?)
    }

    async fn create(
        &self,
        seller_id: &str,
        listing: NewListing,
        status: ListingStatus,
    ) -> AppResult<()> {
        let row = json!({
            "seller_id": seller_id,
            "title": listing.title,
            "description": listing.description,
            "price": listing.price,
            "category": listing.category,
            "location": listing.location,
            "images": Vec::<String>::new(),
            "status": status,
            "is_featured": false,
            "is_premium": false,
            "contact_phone": listing.contact_phone,
            "contact_email": listing.contact_email,
        });
        self.store.insert(TABLE_ADS, row).await
    }

    async fn set_status(&self, id: &str, status: ListingStatus) -> AppResult<()> {
        self.store
            .update(
                &Query::from(TABLE_ADS).eq("id", id),
                json!({ "status": status, "updated_at": Utc::now() }),
            )
            .await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.store.delete(&Query::from(TABLE_ADS).eq("id", id)).await
    }

    async fn delete_owned(&self, id: &str, seller_id: &str) -> AppResult<()> {
        self.store
            .delete(
                &Query::from(TABLE_ADS)
                    .eq("id", id)
                    .eq("seller_id", seller_id),
            )
            .await
    }
}
