//! Ticket domain service implementing the ticket driving ports.
//!
//! Every operation starts by confirming the caller's user record exists.
//! Single-ticket operations then look the ticket up (not found) and check
//! ownership (unauthorized), in that order.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::ports::{
    CreateTicketRequest, TicketChanges, TicketCommand, TicketQuery, TicketRepository,
    TicketRepositoryError, TicketRequest, UpdateTicketRequest, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Error, Ticket, TicketField, TicketId, TicketPatch, TicketValidationError, User, UserId,
    authorize_owner,
};

/// Message for a caller whose user record is missing on list.
pub const CALLER_NOT_AUTHORIZED: &str = "Not authorized";
/// Message for a caller whose user record is missing on single-ticket calls.
pub const UNAUTHORIZED_TOKEN: &str = "Unauthorized token";
/// Message for a ticket id that matches nothing.
pub const TICKET_NOT_FOUND: &str = "Ticket not found";

fn ticket_not_found() -> Error {
    Error::not_found(TICKET_NOT_FOUND)
}

fn map_ticket_error(error: TicketRepositoryError) -> Error {
    match error {
        TicketRepositoryError::Connection { message } => {
            Error::service_unavailable("ticket store unavailable").with_cause(message)
        }
        TicketRepositoryError::Query { message } => {
            Error::internal("ticket store error").with_cause(message)
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable("user store unavailable").with_cause(message)
        }
        UserPersistenceError::Query { message } => {
            Error::internal("user store error").with_cause(message)
        }
    }
}

fn text_change(
    value: Option<&Value>,
    field: TicketField,
) -> Result<Option<&str>, TicketValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(_) => Err(TicketValidationError::NotText(field)),
    }
}

fn patch_from_changes(changes: &TicketChanges) -> Result<TicketPatch, TicketValidationError> {
    TicketPatch::try_from_parts(
        text_change(changes.product.as_ref(), TicketField::Product)?,
        text_change(changes.description.as_ref(), TicketField::Description)?,
        text_change(changes.status.as_ref(), TicketField::Status)?,
    )
}

fn invalid_patch(error: &TicketValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field().as_str(),
        "code": "invalid_value",
    }))
}

/// Ticket service backed by ticket and user repositories.
#[derive(Clone)]
pub struct TicketService<T, U> {
    tickets: Arc<T>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<T, U> TicketService<T, U> {
    /// Create a service over the given repositories and clock.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use support_desk::domain::TicketService;
    /// # use support_desk::domain::ports::{FixtureTicketRepository, FixtureUserRepository};
    /// let service = TicketService::new(
    ///     Arc::new(FixtureTicketRepository),
    ///     Arc::new(FixtureUserRepository),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(tickets: Arc<T>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            tickets,
            users,
            clock,
        }
    }
}

impl<T, U> TicketService<T, U>
where
    T: TicketRepository,
    U: UserRepository,
{
    async fn require_caller(&self, user_id: &UserId, message: &str) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized(message))
    }

    async fn owned_ticket(
        &self,
        caller: &UserId,
        ticket_id: Option<TicketId>,
    ) -> Result<Ticket, Error> {
        let id = ticket_id.ok_or_else(ticket_not_found)?;
        let ticket = self
            .tickets
            .find_by_id(&id)
            .await
            .map_err(map_ticket_error)?
            .ok_or_else(ticket_not_found)?;
        authorize_owner(caller, &ticket)?;
        Ok(ticket)
    }

    fn validate_changes(changes: &TicketChanges) -> Result<TicketPatch, Error> {
        patch_from_changes(changes).map_err(|err| invalid_patch(&err))
    }
}

#[async_trait]
impl<T, U> TicketQuery for TicketService<T, U>
where
    T: TicketRepository,
    U: UserRepository,
{
    async fn list(&self, user_id: &UserId) -> Result<Vec<Ticket>, Error> {
        self.require_caller(user_id, CALLER_NOT_AUTHORIZED).await?;
        self.tickets
            .list_by_owner(user_id)
            .await
            .map_err(map_ticket_error)
    }

    async fn get(&self, request: TicketRequest) -> Result<Ticket, Error> {
        self.require_caller(&request.user_id, UNAUTHORIZED_TOKEN)
            .await?;
        self.owned_ticket(&request.user_id, request.ticket_id).await
    }
}

#[async_trait]
impl<T, U> TicketCommand for TicketService<T, U>
where
    T: TicketRepository,
    U: UserRepository,
{
    async fn create(&self, request: CreateTicketRequest) -> Result<Ticket, Error> {
        let CreateTicketRequest { user_id, draft } = request;
        self.require_caller(&user_id, UNAUTHORIZED_TOKEN).await?;
        let ticket = Ticket::open(TicketId::random(), user_id, draft, self.clock.utc());
        self.tickets
            .insert(&ticket)
            .await
            .map_err(map_ticket_error)?;
        debug!(ticket_id = %ticket.id(), user_id = %ticket.user(), "ticket opened");
        Ok(ticket)
    }

    async fn update(&self, request: UpdateTicketRequest) -> Result<Ticket, Error> {
        let UpdateTicketRequest {
            user_id,
            ticket_id,
            changes,
        } = request;
        self.require_caller(&user_id, UNAUTHORIZED_TOKEN).await?;
        let ticket = self.owned_ticket(&user_id, ticket_id).await?;
        let patch = Self::validate_changes(&changes)?;
        if patch.is_empty() {
            return Ok(ticket);
        }

        let updated = ticket.apply(patch, self.clock.utc());
        let matched = self
            .tickets
            .update(&updated)
            .await
            .map_err(map_ticket_error)?;
        if !matched {
            return Err(ticket_not_found());
        }
        Ok(updated)
    }

    async fn delete(&self, request: TicketRequest) -> Result<(), Error> {
        self.require_caller(&request.user_id, UNAUTHORIZED_TOKEN)
            .await?;
        let ticket = self
            .owned_ticket(&request.user_id, request.ticket_id)
            .await?;
        let removed = self
            .tickets
            .delete(ticket.id())
            .await
            .map_err(map_ticket_error)?;
        if !removed {
            return Err(ticket_not_found());
        }
        debug!(ticket_id = %ticket.id(), "ticket deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "ticket_service_tests.rs"]
mod tests;
