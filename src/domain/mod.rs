//! Domain values exposed by the customer directory.

pub mod criteria;
pub mod customer;
pub mod types;
