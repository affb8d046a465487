//! HTTP inbound adapter exposing the REST endpoints.

use actix_web::{HttpResponse, web};

use crate::domain::Error;

pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tickets;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;

/// Register the ticket and user handlers on an `/api` scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use support_desk::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::login)
        .service(tickets::list_tickets)
        .service(tickets::create_ticket)
        .service(tickets::get_ticket)
        .service(tickets::update_ticket)
        .service(tickets::delete_ticket);
}

/// Fallback for unmatched routes, rendered through the JSON error envelope.
pub async fn route_not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("Route not found"))
}
