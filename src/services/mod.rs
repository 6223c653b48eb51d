//! Stateless services sitting between the controller/routes and the store.

pub mod dashboard;
pub mod directory;
pub mod errors;

pub use errors::{DirectoryError, DirectoryResult, WriteFailure};
