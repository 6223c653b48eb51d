//! DTOs shaped for the customer directory templates and API.

use serde::Serialize;

use crate::domain::criteria::{QueryCriteria, SORT_OPTIONS, STATUS_OPTIONS};
use crate::domain::customer::Customer;

/// Read-only snapshot of the directory state used for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryView {
    pub records: Vec<Customer>,
    pub loading: bool,
    pub criteria: QueryCriteria,
    pub sort_token: String,
}

/// One entry of a filter `<select>`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

impl FilterOption {
    fn list(options: &[(&'static str, &'static str)], current: &str) -> Vec<Self> {
        options
            .iter()
            .map(|&(value, label)| FilterOption {
                value,
                label,
                selected: value == current,
            })
            .collect()
    }

    pub fn sort_options(criteria: &QueryCriteria) -> Vec<Self> {
        Self::list(&SORT_OPTIONS, &criteria.sort_token())
    }

    pub fn status_options(criteria: &QueryCriteria) -> Vec<Self> {
        Self::list(&STATUS_OPTIONS, criteria.status.as_str())
    }
}

/// JSON body returned by `/api/v1/customers`.
#[derive(Debug, Serialize)]
pub struct CustomersResponse {
    pub total: usize,
    pub criteria: QueryCriteria,
    pub customers: Vec<Customer>,
}
