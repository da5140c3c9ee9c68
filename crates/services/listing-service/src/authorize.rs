//! Client-side authorization predicate.
//!
//! The store enforces its own row policies; these checks only stop the
//! client from issuing a mutation it already knows is not allowed.

use common::{AppError, AppResult};
use domain::{Listing, UserProfile};

/// Admins manage every listing; anyone else only their own.
pub fn can_manage_listing(actor: &UserProfile, listing: &Listing) -> bool {
    actor.is_admin() || listing.is_owned_by(&actor.id)
}

pub fn ensure_can_manage(actor: &UserProfile, listing: &Listing) -> AppResult<()> {
    if can_manage_listing(actor, listing) {
        Ok(())
    } else {
        tracing::warn!(actor = %actor.id, listing = %listing.id, "Refusing to modify listing owned by another seller");
        Err(AppError::Forbidden)
    }
}

pub fn ensure_admin(actor: &UserProfile) -> AppResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        tracing::warn!(actor = %actor.id, role = %actor.role, "Admin operation refused");
        Err(AppError::Forbidden)
    }
}

pub fn ensure_can_post(actor: &UserProfile) -> AppResult<()> {
    if actor.role.can_post() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
