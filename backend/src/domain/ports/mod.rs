//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`TicketCommand`, `TicketQuery`, `LoginService`) are what
//! inbound adapters call. Driven ports (`TicketRepository`, `UserRepository`)
//! are what outbound adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod ticket_command;
mod ticket_query;
mod ticket_repository;
mod user_repository;

#[cfg(test)]
pub use login_service::MockLoginService;
pub(crate) use login_service::{fixture_user_id, matches_fixture};
pub use login_service::{
    FIXTURE_EMAIL, FIXTURE_PASSWORD, FIXTURE_USER_ID, FIXTURE_USER_NAME, FixtureLoginService,
    LoginService,
};
#[cfg(test)]
pub use ticket_command::MockTicketCommand;
pub use ticket_command::{
    CreateTicketRequest, TicketChanges, TicketCommand, TicketRequest, UpdateTicketRequest,
};
#[cfg(test)]
pub use ticket_query::MockTicketQuery;
pub use ticket_query::TicketQuery;
#[cfg(test)]
pub use ticket_repository::MockTicketRepository;
pub use ticket_repository::{FixtureTicketRepository, TicketRepository, TicketRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
