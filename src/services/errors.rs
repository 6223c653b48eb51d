//! Typed failures raised by the directory client.

use thiserror::Error;

use crate::domain::criteria::CriteriaError;
use crate::domain::types::CustomerId;
use crate::repository::errors::RepositoryError;

/// Why a create, update or delete did not go through.
#[derive(Debug, Error)]
pub enum WriteFailure {
    #[error("customer {0} no longer exists")]
    NotFound(CustomerId),

    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// A read against the store failed; no partial data is returned.
    #[error("customer query failed: {0}")]
    RemoteQuery(String),

    #[error("customer write failed: {0}")]
    RemoteWrite(#[from] WriteFailure),

    #[error("customer {0} not found")]
    RemoteNotFound(CustomerId),

    #[error("invalid criteria: {0}")]
    InvalidCriteria(#[from] CriteriaError),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

impl DirectoryError {
    /// Classifies a store failure raised by a read.
    pub fn query(err: RepositoryError) -> Self {
        DirectoryError::RemoteQuery(err.to_string())
    }

    /// Classifies a store failure raised by a write against `customer_id`.
    pub fn write(customer_id: Option<CustomerId>, err: RepositoryError) -> Self {
        match (err, customer_id) {
            (RepositoryError::NotFound, Some(id)) => WriteFailure::NotFound(id).into(),
            (err, _) => WriteFailure::Rejected(err.to_string()).into(),
        }
    }

    /// True for the not-found flavours of both reads and writes.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DirectoryError::RemoteNotFound(_)
                | DirectoryError::RemoteWrite(WriteFailure::NotFound(_))
        )
    }
}
