//! Typed repositories over the record store.

mod analytics_repository;
mod listing_repository;
mod payment_repository;
mod profile_repository;

pub use analytics_repository::{AnalyticsRepository, AnalyticsStore};
pub use listing_repository::{ListingRepository, ListingStore};
pub use payment_repository::{PaymentRepository, PaymentStore};
pub use profile_repository::{ProfileRepository, ProfileStore};

#[cfg(any(test, feature = "test-utils"))]
pub use analytics_repository::MockAnalyticsRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use listing_repository::MockListingRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use payment_repository::MockPaymentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use profile_repository::MockProfileRepository;

use serde::de::DeserializeOwned;
use serde_json::Value;

use common::AppResult;

/// Decode a list of rows, failing on the first malformed one.
fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> AppResult<Vec<T>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(Into::into))
        .collect()
}
