//! Driving port for ticket reads.

use async_trait::async_trait;

use crate::domain::{Error, Ticket, UserId};

use super::TicketRequest;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketQuery: Send + Sync {
    /// Every ticket the caller owns, oldest first.
    async fn list(&self, user_id: &UserId) -> Result<Vec<Ticket>, Error>;

    /// One ticket, provided the caller owns it.
    async fn get(&self, request: TicketRequest) -> Result<Ticket, Error>;
}
