//! Marketplace mutations.
//!
//! Every mutation is checked against the acting user before the store is
//! touched, and runs under the write deadline. Refreshing the affected
//! collection afterwards is the calling view-model's job.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use common::{call_with_deadline, AppResult, DeadlineConfig};
use domain::{
    AccountStatus, Listing, ListingStatus, MembershipType, NewListing, UserId, UserProfile,
};
use platform::{ListingRepository, ProfileRepository};

use crate::authorize::{ensure_admin, ensure_can_manage, ensure_can_post};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Listing service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ListingService: Send + Sync {
    /// Validate and publish a new listing owned by `actor`
    async fn post_listing(&self, actor: &UserProfile, listing: NewListing) -> AppResult<()>;

    /// Owner or admin only
    async fn set_listing_status(
        &self,
        actor: &UserProfile,
        listing: &Listing,
        status: ListingStatus,
    ) -> AppResult<()>;

    /// Owner or admin only
    async fn delete_listing(&self, actor: &UserProfile, listing: &Listing) -> AppResult<()>;

    /// Admin only
    async fn set_owner_membership(
        &self,
        actor: &UserProfile,
        owner_id: &str,
        membership: MembershipType,
    ) -> AppResult<()>;

    /// Admin only
    async fn set_account_status(
        &self,
        actor: &UserProfile,
        user_id: &str,
        status: AccountStatus,
    ) -> AppResult<()>;
}

/// Concrete implementation of ListingService
pub struct ListingManager {
    listings: Arc<dyn ListingRepository>,
    profiles: Arc<dyn ProfileRepository>,
    deadlines: DeadlineConfig,
}

impl ListingManager {
    pub fn new(
        listings: Arc<dyn ListingRepository>,
        profiles: Arc<dyn ProfileRepository>,
        deadlines: DeadlineConfig,
    ) -> Self {
        Self {
            listings,
            profiles,
            deadlines,
        }
    }
}

#[async_trait]
impl ListingService for ListingManager {
    async fn post_listing(&self, actor: &UserProfile, listing: NewListing) -> AppResult<()> {
        ensure_can_post(actor)?;
        let listing = listing.validated()?;

        info!(seller_id = %actor.id, title = %listing.title, "Posting listing");
        call_with_deadline(
            "Ad posting",
            self.deadlines.listing_write(),
            self.listings.create(&actor.id, listing, ListingStatus::Active),
        )
        .await?;

        info!(seller_id = %actor.id, "Listing posted");
        Ok(())
    }

    async fn set_listing_status(
        &self,
        actor: &UserProfile,
        listing: &Listing,
        status: ListingStatus,
    ) -> AppResult<()> {
        ensure_can_manage(actor, listing)?;

        call_with_deadline(
            "Ad status update",
            self.deadlines.listing_write(),
            self.listings.set_status(&listing.id, status),
        )
        .await?;

        info!(listing_id = %listing.id, %status, "Listing status updated");
        Ok(())
    }

    async fn delete_listing(&self, actor: &UserProfile, listing: &Listing) -> AppResult<()> {
        ensure_can_manage(actor, listing)?;

        let deletion = async {
            if actor.is_admin() {
                self.listings.delete(&listing.id).await
            } else {
                self.listings.delete_owned(&listing.id, &actor.id).await
            }
        };
        call_with_deadline("Ad deletion", self.deadlines.listing_write(), deletion).await?;

        info!(listing_id = %listing.id, actor = %actor.id, "Listing deleted");
        Ok(())
    }

    async fn set_owner_membership(
        &self,
        actor: &UserProfile,
        owner_id: &str,
        membership: MembershipType,
    ) -> AppResult<()> {
        ensure_admin(actor)?;
        let owner_id: UserId = owner_id.to_string();

        call_with_deadline(
            "Membership update",
            self.deadlines.listing_write(),
            self.profiles.set_membership(&owner_id, membership),
        )
        .await?;

        info!(user_id = %owner_id, %membership, "Membership updated");
        Ok(())
    }

    async fn set_account_status(
        &self,
        actor: &UserProfile,
        user_id: &str,
        status: AccountStatus,
    ) -> AppResult<()> {
        ensure_admin(actor)?;

        call_with_deadline(
            "User status update",
            self.deadlines.listing_write(),
            self.profiles.set_status(user_id, status),
        )
        .await?;

        info!(user_id, %status, "Account status updated");
        Ok(())
    }
}
