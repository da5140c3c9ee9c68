//! Admin console.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::join3;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use common::{call_with_deadline, AppResult, DeadlineConfig, OptionExt};
use domain::{
    AccountStatus, AdminStats, Listing, ListingStatus, MembershipType, UserProfile,
};
use platform::{AnalyticsRepository, ListingRepository, ProfileRepository};

use crate::authorize::ensure_admin;
use crate::filter::{filter_listings, filter_users, ListingQuery, UserQuery};
use crate::service::manager::ListingService;
use crate::service::Repositories;
use crate::state::ViewState;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminOverview {
    pub stats: AdminStats,
    /// Newest first
    pub users: Vec<UserProfile>,
    pub listings: Vec<Listing>,
}

pub struct AdminConsole {
    admin: UserProfile,
    profiles: Arc<dyn ProfileRepository>,
    listings: Arc<dyn ListingRepository>,
    analytics: Arc<dyn AnalyticsRepository>,
    manager: Arc<dyn ListingService>,
    deadlines: DeadlineConfig,
    state: RwLock<ViewState<AdminOverview>>,
    generation: AtomicU64,
}

impl AdminConsole {
    pub fn new(
        admin: UserProfile,
        repositories: &Repositories,
        manager: Arc<dyn ListingService>,
        deadlines: DeadlineConfig,
    ) -> Self {
        Self {
            admin,
            profiles: repositories.profiles.clone(),
            listings: repositories.listings.clone(),
            analytics: repositories.analytics.clone(),
            manager,
            deadlines,
            state: RwLock::new(ViewState::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub async fn snapshot(&self) -> ViewState<AdminOverview> {
        self.state.read().await.clone()
    }

    /// Reload stats, users and listings.
    ///
    /// Each part that loads is applied; the first failure is reported.
    /// A refresh overtaken by a newer one leaves the view untouched.
    pub async fn refresh(&self) -> AppResult<()> {
        ensure_admin(&self.admin)?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().await.begin();

        let read = self.deadlines.listing_read();
        let (stats, users, listings) = join3(
            call_with_deadline("Stats fetch", read, self.analytics.admin_stats()),
            call_with_deadline("Users fetch", read, self.profiles.list()),
            call_with_deadline("Ads fetch", read, self.listings.list_all()),
        )
        .await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Discarding superseded admin refresh");
            return match (stats, users, listings) {
                (Err(err), _, _) if !err.is_unavailable() => Err(err),
                (_, Err(err), _) | (_, _, Err(err)) => Err(err),
                _ => Ok(()),
            };
        }
        let mut overview = state.data.clone();
        let mut failure = None;

        match stats {
            Ok(stats) => overview.stats = stats,
            Err(err) if err.is_unavailable() => {
                debug!("Stats view unavailable, showing zeros");
                overview.stats = AdminStats::default();
            }
            Err(err) => failure = failure.or(Some(err)),
        }
        match users {
            Ok(users) => overview.users = users,
            Err(err) => failure = failure.or(Some(err)),
        }
        match listings {
            Ok(listings) => overview.listings = listings,
            Err(err) => failure = failure.or(Some(err)),
        }

        match failure {
            None => {
                state.succeed(overview);
                Ok(())
            }
            Some(err) => {
                warn!(error = %err, "Admin console refresh failed");
                state.data = overview;
                state.fail(err.user_message());
                Err(err)
            }
        }
    }

    pub async fn users(&self, query: &UserQuery) -> AppResult<Vec<UserProfile>> {
        ensure_admin(&self.admin)?;
        let state = self.state.read().await;
        Ok(filter_users(&state.data.users, query)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn listings(&self, query: &ListingQuery) -> AppResult<Vec<Listing>> {
        ensure_admin(&self.admin)?;
        let state = self.state.read().await;
        Ok(filter_listings(&state.data.listings, query)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn set_user_status(&self, user_id: &str, status: AccountStatus) -> AppResult<()> {
        ensure_admin(&self.admin)?;
        let result = self
            .manager
            .set_account_status(&self.admin, user_id, status)
            .await;
        self.after_write(result).await
    }

    pub async fn set_user_membership(
        &self,
        user_id: &str,
        membership: MembershipType,
    ) -> AppResult<()> {
        ensure_admin(&self.admin)?;
        let result = self
            .manager
            .set_owner_membership(&self.admin, user_id, membership)
            .await;
        self.after_write(result).await
    }

    pub async fn set_listing_status(&self, listing_id: &str, status: ListingStatus) -> AppResult<()> {
        ensure_admin(&self.admin)?;
        let listing = self.loaded(listing_id).await?;
        let result = self
            .manager
            .set_listing_status(&self.admin, &listing, status)
            .await;
        self.after_write(result).await
    }

    pub async fn delete_listing(&self, listing_id: &str) -> AppResult<()> {
        ensure_admin(&self.admin)?;
        let listing = self.loaded(listing_id).await?;
        let result = self.manager.delete_listing(&self.admin, &listing).await;
        self.after_write(result).await
    }

    async fn loaded(&self, listing_id: &str) -> AppResult<Listing> {
        self.state
            .read()
            .await
            .data
            .listings
            .iter()
            .find(|l| l.id == listing_id)
            .cloned()
            .ok_or_not_found()
    }

    async fn after_write(&self, result: AppResult<()>) -> AppResult<()> {
        if let Err(err) = result {
            self.state.write().await.error = Some(err.user_message());
            return Err(err);
        }
        self.refresh().await
    }
}
