//! Domain layer - Marketplace entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! All types here are shared by the platform clients and both services.

pub mod constants;
pub mod error;
pub mod listing;
pub mod payment;
pub mod session;
pub mod stats;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use listing::{Category, Listing, ListingId, ListingStatus, NewListing, SellerSummary};
pub use payment::{PaymentProof, ProofStatus};
pub use session::{AuthSession, AuthUser, UserMetadata};
pub use stats::{AdminStats, SellerStats};
pub use user::{AccountStatus, MembershipType, NewProfile, Role, SignUpRole, UserId, UserProfile};
