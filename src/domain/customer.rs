use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CompanyName, CustomerEmail, CustomerId, CustomerName, TypeConstraintError,
};

/// Whether the customer is currently engaged.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
}

impl CustomerStatus {
    /// Storage and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Inactive => "inactive",
        }
    }
}

impl Display for CustomerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CustomerStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(CustomerStatus::Active),
            "inactive" => Ok(CustomerStatus::Inactive),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown customer status `{other}`"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: CustomerName,
    pub email: CustomerEmail,
    pub status: CustomerStatus,
    pub company: Option<CompanyName>,
    pub created_at: NaiveDateTime,
}

/// Payload submitted when registering a customer. `id` and `created_at` are
/// assigned by the store.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCustomer {
    pub name: CustomerName,
    pub email: CustomerEmail,
    pub status: CustomerStatus,
    pub company: Option<CompanyName>,
}

impl NewCustomer {
    #[must_use]
    pub fn new(
        name: CustomerName,
        email: CustomerEmail,
        status: CustomerStatus,
        company: Option<CompanyName>,
    ) -> Self {
        Self {
            name,
            email,
            status,
            company,
        }
    }
}

/// Partial patch applied to an existing customer.
///
/// `None` leaves the field untouched. `company: Some(None)` clears the company.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateCustomer {
    pub name: Option<CustomerName>,
    pub email: Option<CustomerEmail>,
    pub status: Option<CustomerStatus>,
    pub company: Option<Option<CompanyName>>,
}

impl UpdateCustomer {
    #[must_use]
    pub fn name(mut self, name: CustomerName) -> Self {
        self.name = Some(name);
        self
    }

    #[must_use]
    pub fn email(mut self, email: CustomerEmail) -> Self {
        self.email = Some(email);
        self
    }

    #[must_use]
    pub fn status(mut self, status: CustomerStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn company(mut self, company: Option<CompanyName>) -> Self {
        self.company = Some(company);
        self
    }

    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.status.is_none() && self.company.is_none()
    }
}
