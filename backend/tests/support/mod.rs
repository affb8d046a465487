//! Shared helpers for the HTTP contract tests.
//!
//! Builds the application the way the server does, over in-memory stores,
//! plus a `/test/session/{id}` route that signs in any known user.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, test, web};
use serde_json::Value;

use support_desk::Trace;
use support_desk::domain::{ApiResult, SeededLoginService, TicketService, User, UserId};
use support_desk::inbound::http::session::{SESSION_COOKIE, SessionContext};
use support_desk::inbound::http::state::HttpState;
use support_desk::inbound::http::{configure_api, route_not_found};
use support_desk::middleware::{ErrorTranslator, StackDisclosure};
use support_desk::outbound::memory::{InMemoryTicketRepository, InMemoryUserRepository};

pub const ALICE: &str = "11111111-1111-4111-8111-111111111111";
pub const BOB: &str = "22222222-2222-4222-8222-222222222222";

fn user(id: &str, name: &str, email: &str) -> User {
    User::try_new(UserId::new(id).expect("user id"), name, email).expect("user")
}

async fn sign_in(session: SessionContext, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let user_id = UserId::new(path.as_str()).expect("test user id");
    session.persist_user(&user_id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Initialise the application with Alice and Bob already registered.
pub async fn init_app(
    disclosure: StackDisclosure,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let users = Arc::new(InMemoryUserRepository::with_users([
        user(ALICE, "Alice", "alice@example.com"),
        user(BOB, "Bob", "bob@example.com"),
    ]));
    let tickets = Arc::new(TicketService::new(
        Arc::new(InMemoryTicketRepository::default()),
        users.clone(),
        Arc::new(mockable::DefaultClock),
    ));
    let state = HttpState::new(
        Arc::new(SeededLoginService::new(users)),
        tickets.clone(),
        tickets,
    );
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build();

    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(ErrorTranslator::new(disclosure))
            .wrap(Trace)
            .service(
                web::scope("")
                    .wrap(session)
                    .route("/test/session/{id}", web::get().to(sign_in))
                    .service(web::scope("/api").configure(configure_api)),
            )
            .default_service(web::to(route_not_found)),
    )
    .await
}

/// Extract the session cookie from a response.
pub fn session_cookie(res: &ServiceResponse<BoxBody>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .expect("session cookie")
        .into_owned()
}

/// Sign in as `user` through the test route.
pub async fn sign_in_as<S>(app: &S, user: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri(&format!("/test/session/{user}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    session_cookie(&res)
}

/// Status and decoded JSON body of a response.
pub async fn json_response(res: ServiceResponse<BoxBody>) -> (StatusCode, Value) {
    let status = res.status();
    let body = test::read_body(res).await;
    let value = serde_json::from_slice(&body).expect("JSON body");
    (status, value)
}
