//! Tests for users API handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    FIXTURE_EMAIL, FIXTURE_PASSWORD, FixtureLoginService, FixtureTicketRepository,
    FixtureUserRepository,
};
use crate::domain::TicketService;
use crate::inbound::http::session::SESSION_COOKIE;
use crate::inbound::http::test_utils::test_session_middleware;

fn state() -> HttpState {
    let tickets = Arc::new(TicketService::new(
        Arc::new(FixtureTicketRepository),
        Arc::new(FixtureUserRepository),
        Arc::new(mockable::DefaultClock),
    ));
    HttpState::new(Arc::new(FixtureLoginService), tickets.clone(), tickets)
}

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state()))
        .wrap(test_session_middleware())
        .service(web::scope("/api").service(register).service(login))
}

#[actix_web::test]
async fn register_with_all_fields_returns_stub() {
    let app = actix_test::init_service(test_app()).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"name": "Ada", "email": "ada@example.com", "password": "pw"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(actix_test::read_body(res).await, REGISTER_BODY);
}

#[rstest]
#[case(json!({"email": "ada@example.com", "password": "pw"}), json!(["name"]))]
#[case(json!({"name": "Ada", "email": " ", "password": "pw"}), json!(["email"]))]
#[case(json!({}), json!(["name", "email", "password"]))]
#[actix_web::test]
async fn register_rejects_missing_fields(#[case] body: Value, #[case] missing: Value) {
    let app = actix_test::init_service(test_app()).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/users")
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: Value = actix_test::read_body_json(res).await;
    assert_eq!(payload["message"], INCLUDE_ALL_FIELDS);
    assert_eq!(payload["code"], "invalid_request");
    assert_eq!(payload["details"]["fields"], missing);
}

#[actix_web::test]
async fn register_without_body_lists_every_field() {
    let app = actix_test::init_service(test_app()).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post().uri("/api/users").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: Value = actix_test::read_body_json(res).await;
    assert_eq!(payload["message"], INCLUDE_ALL_FIELDS);
    assert_eq!(payload["details"]["fields"], json!(["name", "email", "password"]));
}

#[actix_web::test]
async fn login_sets_session_cookie() {
    let app = actix_test::init_service(test_app()).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(LoginRequest {
                email: Some(FIXTURE_EMAIL.to_owned()),
                password: Some(FIXTURE_PASSWORD.to_owned()),
            })
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.response()
            .cookies()
            .any(|cookie| cookie.name() == SESSION_COOKIE)
    );
    assert_eq!(actix_test::read_body(res).await, LOGIN_BODY);
}

#[rstest]
#[case(Some(json!({})))]
#[case(Some(json!({"email": FIXTURE_EMAIL})))]
#[case(Some(json!({"email": "", "password": FIXTURE_PASSWORD})))]
#[case(Some(json!({"email": FIXTURE_EMAIL, "password": "hunter2"})))]
#[case(None)]
#[actix_web::test]
async fn login_without_fixture_credentials_still_answers_placeholder(#[case] body: Option<Value>) {
    let app = actix_test::init_service(test_app()).await;
    let request = actix_test::TestRequest::post().uri("/api/users/login");
    let request = match body {
        Some(body) => request.set_json(body),
        None => request,
    };
    let res = actix_test::call_service(&app, request.to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        !res.response()
            .cookies()
            .any(|cookie| cookie.name() == SESSION_COOKIE)
    );
    assert_eq!(actix_test::read_body(res).await, LOGIN_BODY);
}
