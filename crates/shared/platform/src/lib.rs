//! Hosted platform clients.
//!
//! The marketplace delegates persistence, authentication and row-level
//! security to a hosted backend. This crate holds the client side of that
//! contract:
//!
//! - **store**: generic record store (`select` / `insert` / `update` / `delete`)
//! - **identity**: identity provider with session-change notifications
//! - **repositories**: typed access to `users`, `ads` and the analytics tables

pub mod identity;
pub mod query;
pub mod repositories;
pub mod store;
pub mod token;

pub use identity::{AuthChange, AuthEvent, IdentityProvider, RestIdentity, SignUpResponse};
pub use query::Query;
pub use repositories::{
    AnalyticsRepository, AnalyticsStore, ListingRepository, ListingStore, PaymentRepository,
    PaymentStore, ProfileRepository, ProfileStore,
};
pub use store::{RecordStore, RestStore, NO_ROWS_CODE};
pub use token::AccessToken;

#[cfg(any(test, feature = "test-utils"))]
pub use identity::MockIdentityProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockAnalyticsRepository, MockListingRepository, MockPaymentRepository, MockProfileRepository,
};
#[cfg(any(test, feature = "test-utils"))]
pub use store::MockRecordStore;
