//! Placeholder login backed by a user repository.
//!
//! Accepts only the fixture credentials, then makes sure the fixture account
//! exists so ticket operations can find the caller's user record.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    FIXTURE_EMAIL, FIXTURE_USER_NAME, LoginService, UserPersistenceError, UserRepository,
    fixture_user_id, matches_fixture,
};
use crate::domain::{Error, LoginCredentials, User, UserId};

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable("user store unavailable").with_cause(message)
        }
        UserPersistenceError::Query { message } => {
            Error::internal("user store error").with_cause(message)
        }
    }
}

/// `LoginService` that seeds the fixture user on first successful login.
#[derive(Clone)]
pub struct SeededLoginService<U> {
    users: Arc<U>,
}

impl<U> SeededLoginService<U> {
    /// Create a login service writing through `users`.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U> SeededLoginService<U>
where
    U: UserRepository,
{
    async fn ensure_fixture_user(&self, user_id: UserId) -> Result<(), Error> {
        let existing = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Ok(());
        }

        let user = User::try_new(user_id, FIXTURE_USER_NAME, FIXTURE_EMAIL)
            .map_err(|err| Error::internal("invalid fixture user").with_cause(err))?;
        self.users.upsert(&user).await.map_err(map_user_error)?;
        info!(user_id = %user_id, "seeded fixture user");
        Ok(())
    }
}

#[async_trait]
impl<U> LoginService for SeededLoginService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if !matches_fixture(credentials) {
            return Err(Error::unauthorized("Invalid credentials"));
        }
        let user_id = fixture_user_id()?;
        self.ensure_fixture_user(user_id).await?;
        Ok(user_id)
    }
}
