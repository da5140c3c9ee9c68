//! Listing view-models and the mutations behind them.

mod admin;
mod catalog;
mod manager;
mod seller;

use std::sync::Arc;

use platform::{AnalyticsRepository, ListingRepository, PaymentRepository, ProfileRepository};

pub use admin::{AdminConsole, AdminOverview};
pub use catalog::{BrowseCatalog, ListingView};
pub use manager::{ListingManager, ListingService};
pub use seller::{PremiumRequest, SellerDashboard, SellerOverview};

#[cfg(any(test, feature = "test-utils"))]
pub use manager::MockListingService;

/// Repositories the view-models read from.
#[derive(Clone)]
pub struct Repositories {
    pub profiles: Arc<dyn ProfileRepository>,
    pub listings: Arc<dyn ListingRepository>,
    pub analytics: Arc<dyn AnalyticsRepository>,
    pub payments: Arc<dyn PaymentRepository>,
}
