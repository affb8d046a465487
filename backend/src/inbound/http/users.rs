//! Users API handlers.
//!
//! ```text
//! POST /api/users {"name":"Ada","email":"ada@example.com","password":"secret"}
//! POST /api/users/login {"email":"admin@example.com","password":"password"}
//! ```
//!
//! Registration only checks that every field is present; nothing is stored.
//! Login always answers with its placeholder body. Only the fixture account
//! gets its id stored in the session cookie.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{
    Error, ErrorCode, LoginCredentials, LoginValidationError, Registration,
    RegistrationValidationError, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_fields_error};

/// Message for any absent or blank user field.
pub const INCLUDE_ALL_FIELDS: &str = "Please include all fields";
const REGISTER_BODY: &str = "Register Route";
const LOGIN_BODY: &str = "Login Route";

/// Registration body for `POST /api/users`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login body for `POST /api/users/login`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin@example.com")]
    pub email: Option<String>,
    #[schema(example = "password")]
    pub password: Option<String>,
}

impl TryFrom<&RegisterRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: &RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.name.as_deref(),
            value.email.as_deref(),
            value.password.as_deref(),
        )
    }
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.email.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
    }
}

fn map_registration_error(err: &RegistrationValidationError) -> Error {
    missing_fields_error(
        INCLUDE_ALL_FIELDS,
        err.missing()
            .iter()
            .map(|field| FieldName::new(field.as_str())),
    )
}

/// Fixture user id for matching credentials; `None` for anything else.
async fn fixture_session_user(
    state: &HttpState,
    payload: Option<web::Json<LoginRequest>>,
) -> Result<Option<UserId>, Error> {
    let Some(payload) = payload else {
        return Ok(None);
    };
    let credentials = match LoginCredentials::try_from(&payload.into_inner()) {
        Ok(credentials) => credentials,
        Err(err) => {
            debug!(reason = %err, "login without usable credentials");
            return Ok(None);
        }
    };
    match state.login.authenticate(&credentials).await {
        Ok(user_id) => Ok(Some(user_id)),
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            info!("login with non-fixture credentials");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Register a user.
///
/// Placeholder: validates presence of every field and replies with a fixed
/// body.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration accepted", body = String),
        (status = 400, description = "Missing fields", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register(payload: Option<web::Json<RegisterRequest>>) -> ApiResult<HttpResponse> {
    let request = payload.map(web::Json::into_inner).unwrap_or_default();
    let registration =
        Registration::try_from(&request).map_err(|err| map_registration_error(&err))?;
    debug!(email = registration.email(), "registration received");
    Ok(HttpResponse::Ok().body(REGISTER_BODY))
}

/// Placeholder login.
///
/// Always answers `200 Login Route`. The session cookie is only issued for
/// the fixture credentials; a missing body, absent fields or other
/// credentials leave the caller anonymous.
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Placeholder body; session set for the fixture account",
            body = String,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 503, description = "User store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "loginUser",
    security([])
)]
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Option<web::Json<LoginRequest>>,
) -> ApiResult<HttpResponse> {
    if let Some(user_id) = fixture_session_user(&state, payload).await? {
        session.persist_user(&user_id)?;
        debug!(user_id = %user_id, "session established");
    }
    Ok(HttpResponse::Ok().body(LOGIN_BODY))
}

#[cfg(test)]
mod tests;
