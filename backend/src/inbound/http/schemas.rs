//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their serialized shape and are registered under the
//! domain type names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The caller is not logged in, no longer exists, or does not own the
    /// resource.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for the error response body.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Ticket not found")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
    /// Diagnostic trace outside production; `null` in production.
    stack: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Product`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Product)]
pub enum ProductSchema {
    #[schema(rename = "iPhone")]
    IPhone,
    #[schema(rename = "Macbook")]
    Macbook,
    #[schema(rename = "iMac")]
    IMac,
    #[schema(rename = "iPad")]
    IPad,
    #[schema(rename = "Other")]
    Other,
}

/// OpenAPI schema for [`crate::domain::TicketStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TicketStatus)]
pub enum TicketStatusSchema {
    /// Freshly opened; the default.
    #[schema(rename = "new")]
    New,
    #[schema(rename = "open")]
    Open,
    #[schema(rename = "closed")]
    Closed,
}
