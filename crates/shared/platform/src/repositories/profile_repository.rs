//! Stored user profiles (`users` table).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use common::AppResult;
use domain::{AccountStatus, MembershipType, NewProfile, UserProfile, TABLE_USERS};

use super::decode_rows;
use crate::query::Query;
use crate::store::RecordStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Profile repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find profile by ID; `NotFound` when no row exists
    async fn find_by_id(&self, id: &str) -> AppResult<UserProfile>;

    async fn create(&self, profile: NewProfile) -> AppResult<()>;

    /// All profiles, newest first
    async fn list(&self) -> AppResult<Vec<UserProfile>>;

    async fn set_status(&self, id: &str, status: AccountStatus) -> AppResult<()>;

    async fn set_membership(&self, id: &str, membership: MembershipType) -> AppResult<()>;

    /// Cheap read used to check the store is reachable
    async fn check_connection(&self) -> AppResult<()>;
}

/// Concrete implementation of ProfileRepository
pub struct ProfileStore {
    store: Arc<dyn RecordStore>,
}

impl ProfileStore {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileRepository for ProfileStore {
    async fn find_by_id(&self, id: &str) -> AppResult<UserProfile> {
        let row = self
            .store
            .select_single(&Query::from(TABLE_USERS).eq("id", id))
            .await?;
        Ok(serde_json::from_value(row)?)
    }

    async fn create(&self, profile: NewProfile) -> AppResult<()> {
        self.store
            .insert(TABLE_USERS, serde_json::to_value(&profile)?)
            .await
    }

    async fn list(&self) -> AppResult<Vec<UserProfile>> {
        let rows = self
            .store
            .select(&Query::from(TABLE_USERS).newest_first())
            .await?;
        decode_rows(rows)
    }

    async fn set_status(&self, id: &str, status: AccountStatus) -> AppResult<()> {
        self.store
            .update(
                &Query::from(TABLE_USERS).eq("id", id),
                json!({ "status": status, "updated_at": Utc::now() }),
            )
            .await
    }

    async fn set_membership(&self, id: &str, membership: MembershipType) -> AppResult<()> {
        self.store
            .update(
                &Query::from(TABLE_USERS).eq("id", id),
                json!({ "membership_type": membership, "updated_at": Utc::now() }),
            )
            .await
    }

    async fn check_connection(&self) -> AppResult<()> {
        self.store
            .select(&Query::from(TABLE_USERS).select("id").limit(1))
            .await
            .map(|_| ())
    }
}
