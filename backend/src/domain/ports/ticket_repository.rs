//! Driven port for ticket persistence.
//!
//! Adapters store one record per ticket. Nothing here spans the user lookup,
//! the ticket lookup, and the mutation in a transaction; a ticket may vanish
//! between [`TicketRepository::find_by_id`] and a later write, which the write
//! methods report through their `bool` results.

use async_trait::async_trait;

use crate::domain::{Ticket, TicketId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ticket repository adapters.
    pub enum TicketRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "ticket repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ticket repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// All tickets owned by `owner`, oldest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Ticket>, TicketRepositoryError>;

    /// Fetch a ticket by identifier regardless of owner.
    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketRepositoryError>;

    /// Persist a newly opened ticket.
    async fn insert(&self, ticket: &Ticket) -> Result<(), TicketRepositoryError>;

    /// Overwrite the mutable columns of an existing ticket.
    ///
    /// Returns `false` when no row matched.
    async fn update(&self, ticket: &Ticket) -> Result<bool, TicketRepositoryError>;

    /// Remove a ticket. Returns `false` when no row matched.
    async fn delete(&self, id: &TicketId) -> Result<bool, TicketRepositoryError>;
}

/// Empty repository for wiring tests that never reach ticket storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTicketRepository;

#[async_trait]
impl TicketRepository for FixtureTicketRepository {
    async fn list_by_owner(&self, _owner: &UserId) -> Result<Vec<Ticket>, TicketRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: &TicketId) -> Result<Option<Ticket>, TicketRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _ticket: &Ticket) -> Result<(), TicketRepositoryError> {
        Ok(())
    }

    async fn update(&self, _ticket: &Ticket) -> Result<bool, TicketRepositoryError> {
        Ok(false)
    }

    async fn delete(&self, _id: &TicketId) -> Result<bool, TicketRepositoryError> {
        Ok(false)
    }
}
