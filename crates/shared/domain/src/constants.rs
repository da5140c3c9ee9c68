//! Domain-level constants.
//!
//! These constants define business rules, remote table names and the fixed
//! deadlines every external call is raced against.

// =============================================================================
// User Roles
// =============================================================================

/// Role for accounts that post listings
pub const ROLE_SELLER: &str = "seller";

/// Default role assigned when none is known
pub const ROLE_BUYER: &str = "buyer";

/// Administrator role with moderation privileges
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Remote Tables
// =============================================================================

/// Stored user profiles
pub const TABLE_USERS: &str = "users";

/// Listings (ads)
pub const TABLE_ADS: &str = "ads";

/// Aggregate snapshot view maintained by the platform
pub const VIEW_ADMIN_STATS: &str = "admin_dashboard_stats";

/// Optional engagement tables; missing tables degrade to zero counts
pub const TABLE_AD_VIEWS: &str = "ad_views";
pub const TABLE_AD_CONTACTS: &str = "ad_contacts";

/// Premium upgrade requests awaiting admin review
pub const TABLE_PAYMENT_PROOFS: &str = "payment_proofs";

/// Foreign key used to embed the seller into a listing row
pub const ADS_SELLER_FK: &str = "ads_seller_id_fkey";

// =============================================================================
// Deadlines
// =============================================================================

/// Stored profile lookup
pub const PROFILE_FETCH_TIMEOUT_MS: u64 = 5_000;

/// Sign-in and sign-up against the identity provider
pub const AUTH_TIMEOUT_MS: u64 = 10_000;

/// Profile row creation after a successful sign-up
pub const PROFILE_CREATE_TIMEOUT_MS: u64 = 5_000;

/// Listing reads
pub const LISTING_READ_TIMEOUT_MS: u64 = 8_000;

/// Listing writes (post, status change, delete)
pub const LISTING_WRITE_TIMEOUT_MS: u64 = 10_000;

// =============================================================================
// Display
// =============================================================================

/// Seller name shown when a listing has no joined seller
pub const UNKNOWN_SELLER: &str = "Unknown Seller";

/// Name given to a synthesized profile when sign-up metadata carried none
pub const FALLBACK_FULL_NAME: &str = "User";

/// Filter sentinel meaning "do not filter on this field"
pub const FILTER_ALL: &str = "all";
