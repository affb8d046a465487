//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use support_desk::inbound::http::session_config::SessionSettings;
use support_desk::middleware::StackDisclosure;
use support_desk::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) disclosure: StackDisclosure,
}

impl ServerConfig {
    /// Construct a configuration from validated session settings.
    ///
    /// Stacks stay visible in error bodies until
    /// [`with_disclosure`](Self::with_disclosure) says otherwise.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            disclosure: StackDisclosure::Visible,
        }
    }

    /// Attach a database pool; tickets and users are then stored in
    /// PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Choose whether error responses carry diagnostic stacks.
    #[must_use]
    pub fn with_disclosure(mut self, disclosure: StackDisclosure) -> Self {
        self.disclosure = disclosure;
        self
    }
}
