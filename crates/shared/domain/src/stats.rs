//! Read-only aggregates shown on the dashboards.

use serde::{Deserialize, Serialize};

/// Platform-wide snapshot row from the `admin_dashboard_stats` view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_sellers: u64,
    pub total_buyers: u64,
    pub total_ads: u64,
    pub today_signups: u64,
    pub today_views: u64,
}

/// Per-seller counters. Views and contacts are optional enrichment and are
/// zero when their backing tables are unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SellerStats {
    pub total_ads: usize,
    pub active_ads: usize,
    pub total_views: usize,
    pub total_contacts: usize,
}
