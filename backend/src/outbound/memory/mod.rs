//! In-process repositories.
//!
//! State lives behind a `RwLock` and disappears with the process. A poisoned
//! lock is reported as a query error.

mod ticket_repository;
mod user_repository;

pub use ticket_repository::InMemoryTicketRepository;
pub use user_repository::InMemoryUserRepository;
