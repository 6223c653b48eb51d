//! Totals shown on the landing page.

use crate::domain::customer::CustomerStatus;
use crate::dto::main::DashboardData;
use crate::repository::CustomerReader;
use crate::services::errors::{DirectoryError, DirectoryResult};

/// Counts all and active customers.
pub fn load_dashboard<R>(repo: &R) -> DirectoryResult<DashboardData>
where
    R: CustomerReader + ?Sized,
{
    let total = repo.count_customers(None).map_err(DirectoryError::query)?;
    let active = repo
        .count_customers(Some(CustomerStatus::Active))
        .map_err(DirectoryError::query)?;

    Ok(DashboardData {
        total_customers: total,
        active_customers: active,
        inactive_customers: total.saturating_sub(active),
    })
}
