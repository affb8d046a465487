//! Outbound adapters implementing the driven ports.
//!
//! - [`persistence`]: PostgreSQL repositories built on Diesel.
//! - [`memory`]: process-local repositories used when no database is
//!   configured, and by tests.
//!
//! Adapters only translate between domain types and storage; they hold no
//! business rules.

pub mod memory;
pub mod persistence;
