//! Build the HTTP state from whichever store the configuration selects.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use support_desk::domain::ports::{TicketRepository, UserRepository};
use support_desk::domain::{SeededLoginService, TicketService};
use support_desk::inbound::http::state::HttpState;
use support_desk::outbound::memory::{InMemoryTicketRepository, InMemoryUserRepository};
use support_desk::outbound::persistence::{DieselTicketRepository, DieselUserRepository};

use super::ServerConfig;

fn assemble<T, U>(tickets: Arc<T>, users: Arc<U>) -> HttpState
where
    T: TicketRepository + 'static,
    U: UserRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let service = Arc::new(TicketService::new(tickets, users.clone(), clock));
    HttpState::new(
        Arc::new(SeededLoginService::new(users)),
        service.clone(),
        service,
    )
}

/// Wire ticket and login services over PostgreSQL when a pool is configured,
/// otherwise over process-local maps.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL ticket store");
            assemble(
                Arc::new(DieselTicketRepository::new(pool.clone())),
                Arc::new(DieselUserRepository::new(pool.clone())),
            )
        }
        None => {
            info!("using in-memory ticket store");
            assemble(
                Arc::new(InMemoryTicketRepository::default()),
                Arc::new(InMemoryUserRepository::default()),
            )
        }
    };
    web::Data::new(state)
}
