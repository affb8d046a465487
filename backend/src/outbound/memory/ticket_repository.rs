//! `TicketRepository` over a map, listing oldest first.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{TicketRepository, TicketRepositoryError};
use crate::domain::{Ticket, TicketId, UserId};

/// Tickets keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryTicketRepository {
    tickets: RwLock<HashMap<TicketId, Ticket>>,
}

fn poisoned() -> TicketRepositoryError {
    TicketRepositoryError::query("ticket store lock poisoned")
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Ticket>, TicketRepositoryError> {
        let tickets = self.tickets.read().map_err(|_| poisoned())?;
        let mut owned: Vec<Ticket> = tickets
            .values()
            .filter(|ticket| ticket.user() == owner)
            .cloned()
            .collect();
        owned.sort_by_key(|ticket| (ticket.created_at(), *ticket.id().as_uuid()));
        Ok(owned)
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketRepositoryError> {
        let tickets = self.tickets.read().map_err(|_| poisoned())?;
        Ok(tickets.get(id).cloned())
    }

    async fn insert(&self, ticket: &Ticket) -> Result<(), TicketRepositoryError> {
        let mut tickets = self.tickets.write().map_err(|_| poisoned())?;
        tickets.insert(*ticket.id(), ticket.clone());
        Ok(())
    }

    async fn update(&self, ticket: &Ticket) -> Result<bool, TicketRepositoryError> {
        let mut tickets = self.tickets.write().map_err(|_| poisoned())?;
        match tickets.get_mut(ticket.id()) {
            Some(stored) => {
                *stored = ticket.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &TicketId) -> Result<bool, TicketRepositoryError> {
        let mut tickets = self.tickets.write().map_err(|_| poisoned())?;
        Ok(tickets.remove(id).is_some())
    }
}
