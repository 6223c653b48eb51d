//! Form definitions backing the customer directory routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod customers;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid company")]
    InvalidCompany,

    #[error("invalid status")]
    InvalidStatus,

    #[error("nothing to update")]
    EmptyUpdate,
}
