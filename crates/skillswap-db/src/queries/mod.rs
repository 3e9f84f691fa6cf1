//! Parameterized statements, one module per table. Free functions take a
//! `&Connection` so services can compose them inside a single
//! [`Database::with_tx`](crate::Database::with_tx).

pub mod conversations;
pub mod messages;
pub mod requests;
pub mod reviews;
pub mod skills;
pub mod users;
