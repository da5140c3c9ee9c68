//! Role-based landing view.

use domain::{Role, UserProfile};

/// Named views the presentation layer routes between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Browse,
    SellerDashboard,
    AdminDashboard,
}

/// View a user lands on once their profile is resolved.
pub fn landing_view(profile: Option<&UserProfile>) -> View {
    match profile.map(|p| p.role) {
        Some(Role::Admin) => View::AdminDashboard,
        Some(Role::Seller) => View::SellerDashboard,
        Some(Role::Buyer) | None => View::Browse,
    }
}
