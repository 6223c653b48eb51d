//! Store-level failures surfaced by [`crate::repository::DieselRepository`].

pub use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};
