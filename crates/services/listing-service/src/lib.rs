//! Listing Service Library
//!
//! Turns raw listings (remote rows or the built-in sample set) into the
//! filtered, display-ready sequences the browse view and dashboards render,
//! and gates every listing mutation behind the client-side authorization
//! predicate.

pub mod authorize;
pub mod filter;
pub mod normalize;
pub mod sample;
pub mod service;
pub mod state;

pub use authorize::can_manage_listing;
pub use filter::{filter_listings, filter_users, ListingQuery, ListingRecord, UserQuery};
pub use normalize::{normalize, DisplayListing, ListingSource, RawListing, SampleListing};
pub use sample::{sample_display, SAMPLE_LISTINGS};
pub use service::{
    AdminConsole, AdminOverview, BrowseCatalog, ListingManager, ListingService, ListingView,
    PremiumRequest, Repositories, SellerDashboard, SellerOverview,
};
pub use state::ViewState;

#[cfg(any(test, feature = "test-utils"))]
pub use service::MockListingService;
