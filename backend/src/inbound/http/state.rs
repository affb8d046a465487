//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle through `web::Data` so they depend on domain
//! ports only and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, TicketCommand, TicketQuery};

/// Port implementations consumed by the HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub tickets: Arc<dyn TicketCommand>,
    pub tickets_query: Arc<dyn TicketQuery>,
}

impl HttpState {
    /// Bundle the given ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use support_desk::domain::TicketService;
    /// use support_desk::domain::ports::FixtureLoginService;
    /// use support_desk::inbound::http::state::HttpState;
    /// use support_desk::outbound::memory::{InMemoryTicketRepository, InMemoryUserRepository};
    ///
    /// let service = Arc::new(TicketService::new(
    ///     Arc::new(InMemoryTicketRepository::default()),
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(mockable::DefaultClock),
    /// ));
    /// let state = HttpState::new(Arc::new(FixtureLoginService), service.clone(), service);
    /// let _tickets = state.tickets.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        tickets: Arc<dyn TicketCommand>,
        tickets_query: Arc<dyn TicketQuery>,
    ) -> Self {
        Self {
            login,
            tickets,
            tickets_query,
        }
    }
}
