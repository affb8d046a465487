//! Driving port for ticket mutations.
//!
//! Inbound adapters call [`TicketCommand`] with the caller's session identity.
//! Implementations check that the caller still exists before reading or
//! writing any ticket, and that the caller owns the ticket being changed.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Error, Ticket, TicketDraft, TicketId, UserId};

/// Request to open a ticket for the calling user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTicketRequest {
    pub user_id: UserId,
    pub draft: TicketDraft,
}

/// Raw, unvalidated field changes from an update request.
///
/// Values are kept as supplied, JSON type included. Validation is deferred
/// until the caller has been authorized against the ticket, so a foreign
/// ticket is reported as such even when the patch is malformed. `null`
/// counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketChanges {
    pub product: Option<Value>,
    pub description: Option<Value>,
    pub status: Option<Value>,
}

/// Request to update one of the caller's tickets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTicketRequest {
    pub user_id: UserId,
    /// `None` when the path segment was not a ticket identifier.
    pub ticket_id: Option<TicketId>,
    pub changes: TicketChanges,
}

/// Request addressing a single ticket on behalf of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketRequest {
    pub user_id: UserId,
    /// `None` when the path segment was not a ticket identifier.
    pub ticket_id: Option<TicketId>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketCommand: Send + Sync {
    /// Open a ticket with status `new` owned by the caller.
    async fn create(&self, request: CreateTicketRequest) -> Result<Ticket, Error>;

    /// Apply changes to one of the caller's tickets and return the result.
    async fn update(&self, request: UpdateTicketRequest) -> Result<Ticket, Error>;

    /// Delete one of the caller's tickets.
    async fn delete(&self, request: TicketRequest) -> Result<(), Error>;
}
