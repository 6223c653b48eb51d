use diesel::prelude::*;

use crate::db::lower;
use crate::domain::criteria::{SortField, SortOrder};
use crate::domain::customer::{Customer, CustomerStatus, NewCustomer, UpdateCustomer};
use crate::domain::types::CustomerId;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CustomerListQuery, CustomerReader, CustomerWriter, DieselRepository};

/// Escapes LIKE wildcards so the search term matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        use crate::models::customer::Customer as DbCustomer;
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let customer = customers::table
            .find(id.get())
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        customer
            .map(Customer::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_customers(&self, query: &CustomerListQuery) -> RepositoryResult<Vec<Customer>> {
        use crate::models::customer::Customer as DbCustomer;
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let mut items = customers::table.into_boxed();

        // SQLite folds only ASCII in LIKE; compare Unicode-lowered values instead.
        if let Some(search) = &query.search {
            let pattern = like_pattern(&search.to_lowercase());
            items = items.filter(
                lower(customers::name.nullable())
                    .like(pattern.clone())
                    .escape('\\')
                    .or(lower(customers::email.nullable())
                        .like(pattern.clone())
                        .escape('\\'))
                    .or(lower(customers::company).like(pattern).escape('\\')),
            );
        }

        if let Some(status) = query.status {
            items = items.filter(customers::status.eq(status.as_str()));
        }

        // `id` keeps ties in insertion order.
        items = match (query.sort_by, query.sort_order) {
            (SortField::Name, SortOrder::Asc) => {
                items.order((customers::name.asc(), customers::id.asc()))
            }
            (SortField::Name, SortOrder::Desc) => {
                items.order((customers::name.desc(), customers::id.asc()))
            }
            (SortField::CreatedAt, SortOrder::Asc) => {
                items.order((customers::created_at.asc(), customers::id.asc()))
            }
            (SortField::CreatedAt, SortOrder::Desc) => {
                items.order((customers::created_at.desc(), customers::id.asc()))
            }
        };

        items
            .load::<DbCustomer>(&mut conn)?
            .into_iter()
            .map(|customer| Customer::try_from(customer).map_err(RepositoryError::from))
            .collect()
    }

    fn count_customers(&self, status: Option<CustomerStatus>) -> RepositoryResult<usize> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let mut count = customers::table.count().into_boxed();

        if let Some(status) = status {
            count = count.filter(customers::status.eq(status.as_str()));
        }

        let total: i64 = count.get_result(&mut conn)?;

        Ok(total as usize)
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        use crate::models::customer::{Customer as DbCustomer, NewCustomer as DbNewCustomer};
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let insertable: DbNewCustomer = new_customer.into();

        let created = diesel::insert_into(customers::table)
            .values(&insertable)
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(Customer::try_from(created)?)
    }

    fn update_customer(
        &self,
        customer_id: CustomerId,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer> {
        use crate::models::customer::{Customer as DbCustomer, UpdateCustomer as DbUpdateCustomer};
        use crate::schema::customers;

        if updates.is_empty() {
            return Err(RepositoryError::ValidationError(
                "no customer fields to update".to_string(),
            ));
        }

        let mut conn = self.conn()?;
        let db_updates: DbUpdateCustomer = updates.into();

        let updated = diesel::update(customers::table.find(customer_id.get()))
            .set(&db_updates)
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(Customer::try_from(updated)?)
    }

    fn delete_customer(&self, customer_id: CustomerId) -> RepositoryResult<()> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let deleted =
            diesel::delete(customers::table.find(customer_id.get())).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
