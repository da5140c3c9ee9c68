//! Public browse catalog.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use common::{call_with_deadline, AppError, AppResult, DeadlineConfig};
use domain::{NewListing, UserProfile};
use platform::ListingRepository;

use crate::filter::{filter_listings, ListingQuery};
use crate::normalize::{normalize, DisplayListing, ListingSource, RawListing};
use crate::sample::sample_display;
use crate::service::manager::ListingService;
use crate::state::ViewState;

const HINT_FILTERED: &str = "Try adjusting your search criteria";
const HINT_EMPTY: &str = "Be the first to post an ad!";

/// Filtered listings ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView {
    pub items: Vec<DisplayListing>,
    /// Size of the unfiltered collection
    pub total: usize,
    pub filtered: bool,
}

impl ListingView {
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Message for an empty result; `None` when there is something to show.
    pub fn hint(&self) -> Option<&'static str> {
        if !self.is_empty() {
            None
        } else if self.filtered {
            Some(HINT_FILTERED)
        } else {
            Some(HINT_EMPTY)
        }
    }
}

/// Active listings for the browse view.
///
/// A failed or empty remote read never leaves the view blank: the built-in
/// sample set is shown instead, unless remote data was already loaded, in
/// which case that data is kept and only the error is recorded.
pub struct BrowseCatalog {
    listings: Arc<dyn ListingRepository>,
    manager: Arc<dyn ListingService>,
    deadlines: DeadlineConfig,
    state: RwLock<ViewState<Vec<DisplayListing>>>,
    generation: AtomicU64,
}

impl BrowseCatalog {
    pub fn new(
        listings: Arc<dyn ListingRepository>,
        manager: Arc<dyn ListingService>,
        deadlines: DeadlineConfig,
    ) -> Self {
        Self {
            listings,
            manager,
            deadlines,
            state: RwLock::new(ViewState::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub async fn snapshot(&self) -> ViewState<Vec<DisplayListing>> {
        self.state.read().await.clone()
    }

    /// Source of the listings currently held, if any were loaded.
    pub async fn source(&self) -> Option<ListingSource> {
        self.state.read().await.data.first().map(|l| l.source)
    }

    /// Fetch active listings, falling back to the sample set.
    ///
    /// Only the most recently started load may apply its result.
    pub async fn load(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().await.begin();

        let result = call_with_deadline(
            "Ads fetch",
            self.deadlines.listing_read(),
            self.listings.list_active(),
        )
        .await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Discarding superseded listing fetch");
            return;
        }

        match result {
            Ok(listings) if !listings.is_empty() => {
                info!(count = listings.len(), "Loaded remote listings");
                let display = listings
                    .iter()
                    .map(|l| normalize(RawListing::Remote(l)))
                    .collect();
                state.succeed(display);
            }
            Ok(_) => {
                info!("No remote listings, showing sample listings");
                state.succeed(sample_display());
            }
            Err(err) => {
                let has_remote = state
                    .data
                    .first()
                    .is_some_and(|l| l.source == ListingSource::Remote);
                if has_remote {
                    warn!(error = %err, "Listing fetch failed, keeping loaded listings");
                } else {
                    warn!(error = %err, "Listing fetch failed, showing sample listings");
                    state.data = sample_display();
                }
                state.fail(err.user_message());
            }
        }
    }

    pub async fn visible(&self, query: &ListingQuery) -> ListingView {
        let state = self.state.read().await;
        ListingView {
            items: filter_listings(&state.data, query)
                .into_iter()
                .cloned()
                .collect(),
            total: state.data.len(),
            filtered: query.is_filtering(),
        }
    }

    /// Post a listing, then reload the catalog.
    pub async fn post(&self, actor: &UserProfile, listing: NewListing) -> AppResult<()> {
        if let Err(err) = self.manager.post_listing(actor, listing).await {
            self.record_failure(&err).await;
            return Err(err);
        }
        self.load().await;
        Ok(())
    }

    async fn record_failure(&self, err: &AppError) {
        self.state.write().await.error = Some(err.user_message());
    }
}
