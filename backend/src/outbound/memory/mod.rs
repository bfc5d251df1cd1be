//! In-memory relational store adapter.
//!
//! Implements the persistence ports over a single shared table guarded by a
//! `tokio::sync::Mutex`:
//!
//! - [`InMemoryEmployeeStore`]: the table, with versioned rows and a unique
//!   email index.
//! - [`InMemoryUnitOfWork`]: staging, atomic save, and explicit transactions.
//! - [`InMemoryEmployeeRepository`]: read-your-writes queries and staged
//!   writes.

mod connection;
mod repository;
mod store;
mod unit_of_work;

pub use repository::InMemoryEmployeeRepository;
pub use store::InMemoryEmployeeStore;
pub use unit_of_work::{InMemoryUnitOfWork, InMemoryUnitOfWorkFactory};
