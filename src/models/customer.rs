//! Diesel models for the `customers` table.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::{
    Customer as DomainCustomer, NewCustomer as DomainNewCustomer,
    UpdateCustomer as DomainUpdateCustomer,
};
use crate::domain::types::{
    CompanyName, CustomerEmail, CustomerId, CustomerName, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
/// Diesel model for [`crate::domain::customer::Customer`].
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub status: String,
    pub company: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
/// Insertable form of [`Customer`].
pub struct NewCustomer<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub status: &'a str,
    pub company: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
/// Partial patch applied to a [`Customer`] row; `None` fields are skipped.
pub struct UpdateCustomer<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub status: Option<&'a str>,
    pub company: Option<Option<&'a str>>,
}

impl TryFrom<Customer> for DomainCustomer {
    type Error = TypeConstraintError;

    fn try_from(customer: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CustomerId::try_from(customer.id)?,
            name: CustomerName::new(customer.name)?,
            email: CustomerEmail::new(customer.email)?,
            status: customer.status.parse()?,
            company: customer
                .company
                .filter(|company| !company.trim().is_empty())
                .map(CompanyName::new)
                .transpose()?,
            created_at: customer.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewCustomer> for NewCustomer<'a> {
    fn from(customer: &'a DomainNewCustomer) -> Self {
        Self {
            name: customer.name.as_str(),
            email: customer.email.as_str(),
            status: customer.status.as_str(),
            company: customer.company.as_ref().map(CompanyName::as_str),
        }
    }
}

impl<'a> From<&'a DomainUpdateCustomer> for UpdateCustomer<'a> {
    fn from(customer: &'a DomainUpdateCustomer) -> Self {
        Self {
            name: customer.name.as_ref().map(CustomerName::as_str),
            email: customer.email.as_ref().map(CustomerEmail::as_str),
            status: customer.status.map(|status| status.as_str()),
            company: customer
                .company
                .as_ref()
                .map(|company| company.as_ref().map(CompanyName::as_str)),
        }
    }
}
