//! Store boundary for the customer directory.
//!
//! Services depend on the [`CustomerReader`] and [`CustomerWriter`] traits
//! only; [`DieselRepository`] is the SQLite-backed implementation and
//! `mock::MockRepository` the test double.

use crate::db::{DbConnection, DbPool};
use crate::domain::criteria::{QueryCriteria, SortField, SortOrder};
use crate::domain::customer::{Customer, CustomerStatus, NewCustomer, UpdateCustomer};
use crate::domain::types::CustomerId;
use crate::repository::errors::RepositoryResult;

pub mod customer;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Filtered, sorted read over the `customers` collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerListQuery {
    /// Case-insensitive substring matched against name, email and company.
    pub search: Option<String>,
    pub status: Option<CustomerStatus>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl CustomerListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn status(mut self, status: CustomerStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn order_by(mut self, sort_by: SortField, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }
}

impl From<&QueryCriteria> for CustomerListQuery {
    fn from(criteria: &QueryCriteria) -> Self {
        let mut query = CustomerListQuery::new().order_by(criteria.sort_by, criteria.sort_order);

        if !criteria.search.is_empty() {
            query = query.search(criteria.search.as_str());
        }

        if let Some(status) = criteria.status.constraint() {
            query = query.status(status);
        }

        query
    }
}

pub trait CustomerReader {
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, query: &CustomerListQuery) -> RepositoryResult<Vec<Customer>>;
    fn count_customers(&self, status: Option<CustomerStatus>) -> RepositoryResult<usize>;
}

pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    fn update_customer(
        &self,
        customer_id: CustomerId,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer>;
    fn delete_customer(&self, customer_id: CustomerId) -> RepositoryResult<()>;
}

/// Diesel implementation of the store traits over a pooled SQLite database.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}
