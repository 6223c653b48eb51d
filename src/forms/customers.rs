//! Forms for adding, editing and deleting customers.

use serde::Deserialize;
use validator::Validate;

use crate::controller::Confirmation;
use crate::domain::customer::{CustomerStatus, NewCustomer, UpdateCustomer};
use crate::domain::types::{CompanyName, CustomerEmail, CustomerName};
use crate::forms::FormError;

/// Form data for registering a customer.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCustomerForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub status: Option<String>,
    /// Left blank when the customer has no company.
    #[serde(default)]
    pub company: Option<String>,
}

/// Form data for editing a customer. Omitted fields stay untouched; a blank
/// company clears it.
#[derive(Debug, Default, Deserialize)]
pub struct SaveCustomerForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

/// Delete button payload; the checkbox carries the user's confirmation.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteCustomerForm {
    #[serde(default)]
    pub confirm: Option<String>,
}

fn parse_status(value: Option<&str>) -> Result<Option<CustomerStatus>, FormError> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(status) => status
            .parse()
            .map(Some)
            .map_err(|_| FormError::InvalidStatus),
        None => Ok(None),
    }
}

fn parse_company(value: Option<&str>) -> Result<Option<CompanyName>, FormError> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(company) => CompanyName::new(company)
            .map(Some)
            .map_err(|_| FormError::InvalidCompany),
        None => Ok(None),
    }
}

impl TryFrom<AddCustomerForm> for NewCustomer {
    type Error = FormError;

    fn try_from(form: AddCustomerForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = CustomerName::new(form.name).map_err(|_| FormError::InvalidName)?;
        let email = CustomerEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?;
        let status = parse_status(form.status.as_deref())?.unwrap_or_default();
        let company = parse_company(form.company.as_deref())?;

        Ok(NewCustomer::new(name, email, status, company))
    }
}

impl TryFrom<SaveCustomerForm> for UpdateCustomer {
    type Error = FormError;

    fn try_from(form: SaveCustomerForm) -> Result<Self, Self::Error> {
        let mut updates = UpdateCustomer::default();

        if let Some(name) = form.name {
            updates = updates.name(CustomerName::new(name).map_err(|_| FormError::InvalidName)?);
        }
        if let Some(email) = form.email {
            updates =
                updates.email(CustomerEmail::new(email).map_err(|_| FormError::InvalidEmail)?);
        }
        if let Some(status) = parse_status(form.status.as_deref())? {
            updates = updates.status(status);
        }
        if form.company.is_some() {
            updates = updates.company(parse_company(form.company.as_deref())?);
        }

        if updates.is_empty() {
            return Err(FormError::EmptyUpdate);
        }
        Ok(updates)
    }
}

impl Confirmation for DeleteCustomerForm {
    fn confirm(&self, _prompt: &str) -> bool {
        matches!(
            self.confirm.as_deref().map(str::trim),
            Some("on" | "true" | "yes" | "1")
        )
    }
}
