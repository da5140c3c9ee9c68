//! Seller dashboard: own listings, counters and premium requests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::join;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use common::{call_with_deadline, AppError, AppResult, DeadlineConfig, OptionExt};
use domain::{Listing, ListingStatus, PaymentProof, SellerStats, UserProfile};
use platform::{AnalyticsRepository, ListingRepository, PaymentRepository};

use crate::service::manager::ListingService;
use crate::service::Repositories;
use crate::state::ViewState;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SellerOverview {
    /// Newest first
    pub listings: Vec<Listing>,
    pub stats: SellerStats,
}

/// Outcome of a premium upgrade request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PremiumRequest {
    /// Proof stored for admin review
    Submitted,
    /// Proof storage is unavailable; the request is accepted without a record
    Simulated,
}

impl PremiumRequest {
    pub fn is_simulated(&self) -> bool {
        matches!(self, PremiumRequest::Simulated)
    }
}

pub struct SellerDashboard {
    seller: UserProfile,
    listings: Arc<dyn ListingRepository>,
    analytics: Arc<dyn AnalyticsRepository>,
    payments: Arc<dyn PaymentRepository>,
    manager: Arc<dyn ListingService>,
    deadlines: DeadlineConfig,
    state: RwLock<ViewState<SellerOverview>>,
    generation: AtomicU64,
}

impl SellerDashboard {
    pub fn new(
        seller: UserProfile,
        repositories: &Repositories,
        manager: Arc<dyn ListingService>,
        deadlines: DeadlineConfig,
    ) -> Self {
        Self {
            seller,
            listings: repositories.listings.clone(),
            analytics: repositories.analytics.clone(),
            payments: repositories.payments.clone(),
            manager,
            deadlines,
            state: RwLock::new(ViewState::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn seller(&self) -> &UserProfile {
        &self.seller
    }

    pub async fn snapshot(&self) -> ViewState<SellerOverview> {
        self.state.read().await.clone()
    }

    /// Reload own listings and counters.
    ///
    /// When refreshes overlap only the most recently started one settles the
    /// view; an older one still returns its own outcome to its caller.
    pub async fn refresh(&self) -> AppResult<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().await.begin();

        let result = call_with_deadline(
            "Seller ads fetch",
            self.deadlines.listing_read(),
            self.listings.list_by_seller(&self.seller.id),
        )
        .await;

        let listings = match result {
            Ok(listings) => listings,
            Err(err) => {
                warn!(seller_id = %self.seller.id, error = %err, "Seller listing fetch failed");
                let mut state = self.state.write().await;
                if self.is_current(generation) {
                    state.fail(err.user_message());
                }
                return Err(err);
            }
        };

        let stats = self.stats_for(&listings).await;
        let mut state = self.state.write().await;
        if !self.is_current(generation) {
            debug!(generation, "Discarding superseded seller refresh");
            return Ok(());
        }
        state.succeed(SellerOverview { listings, stats });
        Ok(())
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    pub async fn delete(&self, listing_id: &str) -> AppResult<()> {
        let listing = self.loaded(listing_id).await?;
        let result = self.manager.delete_listing(&self.seller, &listing).await;
        self.after_write(result).await
    }

    pub async fn set_status(&self, listing_id: &str, status: ListingStatus) -> AppResult<()> {
        let listing = self.loaded(listing_id).await?;
        let result = self
            .manager
            .set_listing_status(&self.seller, &listing, status)
            .await;
        self.after_write(result).await
    }

    /// Submit a payment proof asking for premium membership.
    pub async fn request_premium(&self, file_name: &str, file_size: u64) -> AppResult<PremiumRequest> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(AppError::validation("Please select a payment proof file"));
        }

        let proof = PaymentProof::pending(self.seller.id.clone(), file_name, file_size);
        let result = call_with_deadline(
            "Payment proof upload",
            self.deadlines.listing_write(),
            self.payments.submit(proof),
        )
        .await;

        match result {
            Ok(()) => {
                info!(seller_id = %self.seller.id, file_name, "Payment proof submitted");
                Ok(PremiumRequest::Submitted)
            }
            Err(err) if err.is_unavailable() => {
                info!(seller_id = %self.seller.id, "Payment proof storage unavailable, simulating submission");
                Ok(PremiumRequest::Simulated)
            }
            Err(err) => Err(err),
        }
    }

    async fn stats_for(&self, listings: &[Listing]) -> SellerStats {
        let ids: Vec<String> = listings.iter().map(|l| l.id.clone()).collect();
        let read = self.deadlines.listing_read();

        let (views, contacts) = join(
            call_with_deadline("Ad views count", read, self.analytics.count_views(&ids)),
            call_with_deadline("Ad contacts count", read, self.analytics.count_contacts(&ids)),
        )
        .await;

        SellerStats {
            total_ads: listings.len(),
            active_ads: listings
                .iter()
                .filter(|l| l.status == ListingStatus::Active)
                .count(),
            total_views: or_zero(views, "views"),
            total_contacts: or_zero(contacts, "contacts"),
        }
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

fn or_zero(count: AppResult<usize>, counter: &'static str) -> usize {
    count.unwrap_or_else(|err| {
        debug!(counter, error = %err, "Engagement count unavailable");
        0
    })
}
