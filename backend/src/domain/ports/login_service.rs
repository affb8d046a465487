//! Driving port for the placeholder login flow.
//!
//! Handlers authenticate through [`LoginService`] without knowing whether the
//! fixture account lives in PostgreSQL, in memory, or nowhere at all.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Email accepted by the placeholder authenticator.
pub const FIXTURE_EMAIL: &str = "admin@example.com";
/// Password accepted by the placeholder authenticator.
pub const FIXTURE_PASSWORD: &str = "password";
/// Identifier of the fixture account.
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";
/// Display name of the fixture account.
pub const FIXTURE_USER_NAME: &str = "Ada Lovelace";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

pub(crate) fn fixture_user_id() -> Result<UserId, Error> {
    UserId::new(FIXTURE_USER_ID)
        .map_err(|err| Error::internal("invalid fixture user id").with_cause(err))
}

pub(crate) fn matches_fixture(credentials: &LoginCredentials) -> bool {
    credentials.email() == FIXTURE_EMAIL && credentials.password() == FIXTURE_PASSWORD
}

/// Stateless authenticator accepting only the fixture credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if matches_fixture(credentials) {
            fixture_user_id()
        } else {
            Err(Error::unauthorized("Invalid credentials"))
        }
    }
}
