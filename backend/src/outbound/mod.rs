//! Outbound adapters implementing domain ports for infrastructure.
//!
//! - **memory**: in-memory relational store backing the employee
//!   repository and unit of work.
//!
//! Adapters are thin translators between domain types and storage
//! representations. They contain no business logic.

pub mod memory;
