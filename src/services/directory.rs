//! Directory client: one store round trip per call, no retries.
//!
//! Every failure is classified into [`DirectoryError`] and propagated; the
//! controller is the only place that recovers from them.

use crate::domain::criteria::QueryCriteria;
use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::types::CustomerId;
use crate::repository::errors::RepositoryError;
use crate::repository::{CustomerListQuery, CustomerReader, CustomerWriter};
use crate::services::errors::{DirectoryError, DirectoryResult, WriteFailure};

/// Lists the customers matching the criteria in the requested order.
pub fn list_customers<R>(repo: &R, criteria: &QueryCriteria) -> DirectoryResult<Vec<Customer>>
where
    R: CustomerReader + ?Sized,
{
    let query = CustomerListQuery::from(criteria);
    repo.list_customers(&query).map_err(DirectoryError::query)
}

/// Registers a customer and returns the stored record with its assigned id.
pub fn create_customer<R>(repo: &R, new_customer: &NewCustomer) -> DirectoryResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    repo.create_customer(new_customer)
        .map_err(|err| DirectoryError::write(None, err))
}

/// Applies a partial patch and returns the updated record.
pub fn update_customer<R>(
    repo: &R,
    customer_id: CustomerId,
    updates: &UpdateCustomer,
) -> DirectoryResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    if updates.is_empty() {
        return Err(WriteFailure::Rejected("nothing to update".to_string()).into());
    }

    repo.update_customer(customer_id, updates)
        .map_err(|err| DirectoryError::write(Some(customer_id), err))
}

/// Deletes the customer.
pub fn delete_customer<R>(repo: &R, customer_id: CustomerId) -> DirectoryResult<()>
where
    R: CustomerWriter + ?Sized,
{
    repo.delete_customer(customer_id)
        .map_err(|err| DirectoryError::write(Some(customer_id), err))
}

/// Fetches a single customer, failing with `RemoteNotFound` when absent.
pub fn get_customer<R>(repo: &R, customer_id: CustomerId) -> DirectoryResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    match repo.get_customer_by_id(customer_id) {
        Ok(Some(customer)) => Ok(customer),
        Ok(None) | Err(RepositoryError::NotFound) => {
            Err(DirectoryError::RemoteNotFound(customer_id))
        }
        Err(err) => Err(DirectoryError::query(err)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::criteria::{CriteriaChange, SortField, SortOrder, StatusFilter};
    use crate::domain::customer::CustomerStatus;
    use crate::domain::types::{CustomerEmail, CustomerName};
    use crate::repository::mock::MockRepository;

    fn customer(id: i32, name: &str, status: CustomerStatus) -> Customer {
        Customer {
            id: CustomerId::new(id).unwrap(),
            name: CustomerName::new(name).unwrap(),
            email: CustomerEmail::new(format!("{}@example.com", name.to_lowercase())).unwrap(),
            status,
            company: None,
            created_at: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    fn id(value: i32) -> CustomerId {
        CustomerId::new(value).unwrap()
    }

    #[test]
    fn list_translates_criteria_into_one_query() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers()
            .withf(|query| {
                query.search.as_deref() == Some("bo")
                    && query.status == Some(CustomerStatus::Active)
                    && query.sort_by == SortField::CreatedAt
                    && query.sort_order == SortOrder::Desc
            })
            .times(1)
            .returning(|_| Ok(vec![customer(1, "Bob", CustomerStatus::Active)]));

        let criteria = QueryCriteria::default()
            .apply(CriteriaChange::Search("bo".into()))
            .apply(CriteriaChange::Status(StatusFilter::Active))
            .apply(CriteriaChange::Sort {
                by: SortField::CreatedAt,
                order: SortOrder::Desc,
            });

        let customers = list_customers(&repo, &criteria).expect("should list");
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].name.as_str(), "Bob");
    }

    #[test]
    fn list_failure_is_a_query_error() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers()
            .times(1)
            .returning(|_| Err(RepositoryError::ConnectionError("down".into())));

        let result = list_customers(&repo, &QueryCriteria::default());

        assert!(matches!(result, Err(DirectoryError::RemoteQuery(_))));
    }

    #[test]
    fn update_of_missing_customer_is_write_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_update_customer()
            .times(1)
            .returning(|_, _| Err(RepositoryError::NotFound));

        let patch = UpdateCustomer::default().status(CustomerStatus::Inactive);
        let result = update_customer(&repo, id(3), &patch);

        assert!(matches!(
            result,
            Err(DirectoryError::RemoteWrite(WriteFailure::NotFound(missing))) if missing == id(3)
        ));
    }

    #[test]
    fn empty_update_never_reaches_the_store() {
        let mut repo = MockRepository::new();
        repo.expect_update_customer().times(0);

        let result = update_customer(&repo, id(3), &UpdateCustomer::default());

        assert!(matches!(
            result,
            Err(DirectoryError::RemoteWrite(WriteFailure::Rejected(_)))
        ));
    }

    #[test]
    fn create_failure_is_rejected_write() {
        let mut repo = MockRepository::new();
        repo.expect_create_customer()
            .times(1)
            .returning(|_| Err(RepositoryError::ConstraintViolation("dup".into())));

        let new_customer = NewCustomer::new(
            CustomerName::new("Bob").unwrap(),
            CustomerEmail::new("bob@example.com").unwrap(),
            CustomerStatus::Active,
            None,
        );

        let result = create_customer(&repo, &new_customer);

        assert!(matches!(
            result,
            Err(DirectoryError::RemoteWrite(WriteFailure::Rejected(_)))
        ));
    }

    #[test]
    fn delete_of_missing_customer_is_write_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_delete_customer()
            .withf(|customer_id| customer_id.get() == 9)
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        let result = delete_customer(&repo, id(9));

        assert!(result.as_ref().is_err_and(DirectoryError::is_not_found));
    }

    #[test]
    fn get_absent_customer_is_remote_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = get_customer(&repo, id(4));

        assert!(matches!(result, Err(DirectoryError::RemoteNotFound(missing)) if missing == id(4)));
    }

    #[test]
    fn get_store_failure_is_query_error() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .times(1)
            .returning(|_| Err(RepositoryError::DatabaseError("locked".into())));

        let result = get_customer(&repo, id(4));

        assert!(matches!(result, Err(DirectoryError::RemoteQuery(_))));
    }
}
