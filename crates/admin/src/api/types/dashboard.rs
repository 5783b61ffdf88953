//! Dashboard summary.

use serde::{Deserialize, Serialize};

use super::{Activity, User};

/// `data` payload of `GET /admin/dashboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub recent_users: Vec<User>,
    #[serde(default)]
    pub recent_activities: Vec<Activity>,
}

/// Headline counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_users: u64,
    pub active_users: u64,
    pub inactive_users: u64,
    pub total_products: u64,
    pub total_posts: u64,
    pub total_events: u64,
}
