//! Tickets API handlers.
//!
//! ```text
//! GET    /api/tickets
//! GET    /api/tickets/{id}
//! POST   /api/tickets {"product":"iPhone","description":"Screen cracked"}
//! PUT    /api/tickets/{id} {"status":"open"}
//! DELETE /api/tickets/{id}
//! ```
//!
//! Every handler needs a session. Create validates its body before looking
//! at the session, so a malformed request is a 400 even for anonymous
//! callers.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ports::{CreateTicketRequest, TicketChanges, TicketRequest, UpdateTicketRequest};
use crate::domain::{
    Error, Product, Ticket, TicketDraft, TicketId, TicketStatus, TicketValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, ProductSchema, TicketStatusSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error, missing_fields_error};

/// Message for a create request lacking `product` or `description`.
pub const MISSING_FIELDS: &str = "Missing fields";
/// Message for a create request naming an unknown product.
pub const INVALID_PRODUCT: &str = "Please select a valid product";

/// Ticket as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: TicketId,
    /// Owning user id.
    #[schema(value_type = String, format = Uuid)]
    pub user: String,
    #[schema(value_type = ProductSchema)]
    pub product: Product,
    #[schema(example = "Screen cracked")]
    pub description: String,
    #[schema(value_type = TicketStatusSchema)]
    pub status: TicketStatus,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<&Ticket> for TicketResponse {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: *ticket.id(),
            user: ticket.user().to_string(),
            product: ticket.product(),
            description: ticket.description().to_owned(),
            status: ticket.status(),
            created_at: ticket.created_at(),
            updated_at: ticket.updated_at(),
        }
    }
}

/// Body of `GET /api/tickets`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TicketListResponse {
    pub tickets: Vec<TicketResponse>,
}

/// Body of `GET /api/tickets/{id}` and `POST /api/tickets`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TicketEnvelope {
    pub ticket: TicketResponse,
}

/// Body of `PUT /api/tickets/{id}`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedTicketEnvelope {
    pub updated_ticket: TicketResponse,
}

/// Body of `DELETE /api/tickets/{id}`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteTicketResponse {
    pub success: bool,
}

/// Body of `POST /api/tickets`. Other keys are ignored.
#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateTicketBody {
    #[schema(example = "iPhone")]
    pub product: Option<String>,
    #[schema(example = "Screen cracked")]
    pub description: Option<String>,
}

/// Body of `PUT /api/tickets/{id}`. Other keys, `user` included, are ignored.
///
/// Values stay untyped here; they are checked only once the caller is known
/// to own the ticket.
#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateTicketBody {
    #[schema(value_type = Option<String>, example = "iPad")]
    pub product: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub description: Option<Value>,
    #[schema(value_type = Option<String>, example = "open")]
    pub status: Option<Value>,
}

impl From<UpdateTicketBody> for TicketChanges {
    fn from(body: UpdateTicketBody) -> Self {
        Self {
            product: body.product,
            description: body.description,
            status: body.status,
        }
    }
}

fn map_draft_error(err: &TicketValidationError) -> Error {
    match err {
        TicketValidationError::MissingFields { fields } => missing_fields_error(
            MISSING_FIELDS,
            fields.iter().map(|field| FieldName::new(field.as_str())),
        ),
        TicketValidationError::UnknownProduct(value) => {
            invalid_value_error(INVALID_PRODUCT, FieldName::new("product"), value)
        }
        // Drafts never produce these; only patches do.
        TicketValidationError::UnknownStatus(_)
        | TicketValidationError::BlankDescription
        | TicketValidationError::NotText(_) => Error::invalid_request(err.to_string()),
    }
}

fn ticket_request(session: &SessionContext, id: &str) -> Result<TicketRequest, Error> {
    Ok(TicketRequest {
        user_id: session.require_user_id()?,
        ticket_id: TicketId::parse(id),
    })
}

/// List the caller's tickets, oldest first.
#[utoipa::path(
    get,
    path = "/api/tickets",
    responses(
        (status = 200, description = "Caller's tickets", body = TicketListResponse),
        (status = 401, description = "Not logged in or unknown user", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "listTickets"
)]
#[get("/tickets")]
pub async fn list_tickets(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<TicketListResponse>> {
    let user_id = session.require_user_id()?;
    let tickets = state.tickets_query.list(&user_id).await?;
    Ok(web::Json(TicketListResponse {
        tickets: tickets.iter().map(TicketResponse::from).collect(),
    }))
}

/// Fetch one of the caller's tickets.
#[utoipa::path(
    get,
    path = "/api/tickets/{id}",
    params(("id" = String, Path, description = "Ticket id")),
    responses(
        (status = 200, description = "The ticket", body = TicketEnvelope),
        (status = 401, description = "Not logged in or not the owner", body = ErrorSchema),
        (status = 404, description = "Ticket not found", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "getTicket"
)]
#[get("/tickets/{id}")]
pub async fn get_ticket(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<TicketEnvelope>> {
    let request = ticket_request(&session, &path)?;
    let ticket = state.tickets_query.get(request).await?;
    Ok(web::Json(TicketEnvelope {
        ticket: TicketResponse::from(&ticket),
    }))
}

/// Open a ticket owned by the caller with status `new`.
#[utoipa::path(
    post,
    path = "/api/tickets",
    request_body = CreateTicketBody,
    responses(
        (status = 201, description = "Ticket created", body = TicketEnvelope),
        (status = 400, description = "Missing fields or unknown product", body = ErrorSchema),
        (status = 401, description = "Not logged in or unknown user", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "createTicket"
)]
#[post("/tickets")]
pub async fn create_ticket(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateTicketBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let draft = TicketDraft::try_from_parts(body.product.as_deref(), body.description.as_deref())
        .map_err(|err| map_draft_error(&err))?;
    let user_id = session.require_user_id()?;
    let ticket = state
        .tickets
        .create(CreateTicketRequest { user_id, draft })
        .await?;
    Ok(HttpResponse::Created().json(TicketEnvelope {
        ticket: TicketResponse::from(&ticket),
    }))
}

/// Change `product`, `description` or `status` of one of the caller's
/// tickets.
///
/// A body that is not a JSON object counts as an empty patch, so ownership
/// is always decided before anything about the body is rejected.
#[utoipa::path(
    put,
    path = "/api/tickets/{id}",
    params(("id" = String, Path, description = "Ticket id")),
    request_body = UpdateTicketBody,
    responses(
        (status = 200, description = "Ticket updated", body = UpdatedTicketEnvelope),
        (status = 400, description = "Invalid field value", body = ErrorSchema),
        (status = 401, description = "Not logged in or not the owner", body = ErrorSchema),
        (status = 404, description = "Ticket not found", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "updateTicket"
)]
#[put("/tickets/{id}")]
pub async fn update_ticket(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Option<web::Json<UpdateTicketBody>>,
) -> ApiResult<web::Json<UpdatedTicketEnvelope>> {
    let TicketRequest { user_id, ticket_id } = ticket_request(&session, &path)?;
    let ticket = state
        .tickets
        .update(UpdateTicketRequest {
            user_id,
            ticket_id,
            changes: payload
                .map(web::Json::into_inner)
                .unwrap_or_default()
                .into(),
        })
        .await?;
    Ok(web::Json(UpdatedTicketEnvelope {
        updated_ticket: TicketResponse::from(&ticket),
    }))
}

/// Delete one of the caller's tickets.
#[utoipa::path(
    delete,
    path = "/api/tickets/{id}",
    params(("id" = String, Path, description = "Ticket id")),
    responses(
        (status = 200, description = "Ticket deleted", body = DeleteTicketResponse),
        (status = 401, description = "Not logged in or not the owner", body = ErrorSchema),
        (status = 404, description = "Ticket not found", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "deleteTicket"
)]
#[delete("/tickets/{id}")]
pub async fn delete_ticket(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteTicketResponse>> {
    let request = ticket_request(&session, &path)?;
    state.tickets.delete(request).await?;
    Ok(web::Json(DeleteTicketResponse { success: true }))
}

#[cfg(test)]
#[path = "tickets_tests.rs"]
mod tests;
