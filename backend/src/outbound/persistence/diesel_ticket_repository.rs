//! PostgreSQL-backed `TicketRepository`.
//!
//! Product and status live in text columns and are parsed back into the
//! closed enums on read; a row holding anything else is reported as a query
//! error rather than silently coerced.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{TicketRepository, TicketRepositoryError};
use crate::domain::{Product, Ticket, TicketId, TicketStatus, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewTicketRow, TicketRow, TicketUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::tickets;

/// Diesel implementation of [`TicketRepository`].
#[derive(Clone)]
pub struct DieselTicketRepository {
    pool: DbPool,
}

impl DieselTicketRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TicketRepositoryError {
    map_basic_pool_error(error, TicketRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TicketRepositoryError {
    map_basic_diesel_error(
        error,
        TicketRepositoryError::query,
        TicketRepositoryError::connection,
    )
}

fn row_to_ticket(row: TicketRow) -> Result<Ticket, TicketRepositoryError> {
    let invalid = |err: &dyn std::fmt::Display| {
        warn!(ticket_id = %row.id, error = %err, "stored ticket failed validation");
        TicketRepositoryError::query("invalid ticket record")
    };
    let product = row.product.parse::<Product>().map_err(|err| invalid(&err))?;
    let status = row.status.parse::<TicketStatus>().map_err(|err| invalid(&err))?;
    Ok(Ticket::from_parts(
        TicketId::from_uuid(row.id),
        UserId::from_uuid(row.user_id),
        product,
        row.description,
        status,
        row.created_at,
        row.updated_at,
    ))
}

#[async_trait]
impl TicketRepository for DieselTicketRepository {
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Ticket>, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TicketRow> = tickets::table
            .filter(tickets::user_id.eq(owner.as_uuid()))
            .order((tickets::created_at.asc(), tickets::id.asc()))
            .select(TicketRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_ticket).collect()
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TicketRow> = tickets::table
            .find(id.as_uuid())
            .select(TicketRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_ticket).transpose()
    }

    async fn insert(&self, ticket: &Ticket) -> Result<(), TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewTicketRow {
            id: *ticket.id().as_uuid(),
            user_id: *ticket.user().as_uuid(),
            product: ticket.product().as_str(),
            description: ticket.description(),
            status: ticket.status().as_str(),
            created_at: ticket.created_at(),
            updated_at: ticket.updated_at(),
        };
        diesel::insert_into(tickets::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, ticket: &Ticket) -> Result<bool, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = TicketUpdate {
            product: ticket.product().as_str(),
            description: ticket.description(),
            status: ticket.status().as_str(),
            updated_at: ticket.updated_at(),
        };
        let affected = diesel::update(tickets::table.find(ticket.id().as_uuid()))
            .set(changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: &TicketId) -> Result<bool, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(tickets::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
