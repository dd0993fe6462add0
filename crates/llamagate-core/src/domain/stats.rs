//! Aggregate view data for the dashboard.

use serde::{Deserialize, Serialize};

/// Total and active row counts for one entity kind.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityCounts {
    pub total: i64,
    pub active: i64,
}

/// Pre-computed numbers for the dashboard page.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_api_keys: i64,
    pub active_api_keys: i64,
    pub total_users: i64,
    pub active_users: i64,
    /// Authenticated proxied calls since UTC midnight.
    pub requests_today: i64,
}
