use serde::Serialize;

/// Customer totals rendered on the dashboard.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DashboardData {
    pub total_customers: usize,
    pub active_customers: usize,
    pub inactive_customers: usize,
}
