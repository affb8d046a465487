//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between internal row structs and
//! domain types; neither rows nor the table definitions leave
//! this module. Connections come from a `bb8` pool through `diesel-async`.
//!
//! ```no_run
//! # async fn demo() -> Result<(), support_desk::outbound::persistence::PoolError> {
//! use support_desk::outbound::persistence::{DbPool, DieselTicketRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/support_desk")).await?;
//! let tickets = DieselTicketRepository::new(pool);
//! # let _ = tickets;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_ticket_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_ticket_repository::DieselTicketRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
