//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the ticket, user and health endpoints together with
//! schema wrappers for the domain enums and the error envelope, so domain
//! types stay free of utoipa derives. The document backs Swagger UI in debug
//! builds and `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, ProductSchema, TicketStatusSchema,
};
use crate::inbound::http::tickets::{
    CreateTicketBody, DeleteTicketResponse, TicketEnvelope, TicketListResponse, TicketResponse,
    UpdateTicketBody, UpdatedTicketEnvelope,
};
use crate::inbound::http::users::{LoginRequest, RegisterRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/users/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Support desk API",
        description = "Session-authenticated ticket tracking and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::tickets::list_tickets,
        crate::inbound::http::tickets::get_ticket,
        crate::inbound::http::tickets::create_ticket,
        crate::inbound::http::tickets::update_ticket,
        crate::inbound::http::tickets::delete_ticket,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ProductSchema,
        TicketStatusSchema,
        TicketResponse,
        TicketListResponse,
        TicketEnvelope,
        UpdatedTicketEnvelope,
        DeleteTicketResponse,
        CreateTicketBody,
        UpdateTicketBody,
        RegisterRequest,
        LoginRequest,
    )),
    tags(
        (name = "tickets", description = "Tickets owned by the session user"),
        (name = "users", description = "Registration and login"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
