//! Domain primitives, aggregates, and services.
//!
//! Types here know nothing about HTTP or SQL. Inbound adapters reach the
//! domain through the driving ports in [`ports`]; outbound adapters implement
//! the driven ports.

pub mod auth;
pub mod error;
pub mod login;
pub mod ownership;
pub mod ports;
pub mod ticket;
pub mod ticket_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    LoginCredentials, LoginValidationError, Registration, RegistrationField,
    RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::login::SeededLoginService;
pub use self::ownership::{NOT_AUTHORIZED, Owned, authorize_owner};
pub use self::ticket::{
    Product, Ticket, TicketDraft, TicketField, TicketId, TicketPatch, TicketStatus,
    TicketValidationError,
};
pub use self::ticket_service::TicketService;
pub use self::trace_id::TraceId;
pub use self::user::{User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use support_desk::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Ticket not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
