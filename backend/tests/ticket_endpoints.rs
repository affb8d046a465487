//! HTTP contract tests for the ticket and user endpoints over in-memory stores.

mod support;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use rstest::rstest;
use serde_json::{Value, json};

use support::{ALICE, BOB, init_app, json_response, session_cookie, sign_in_as};
use support_desk::middleware::StackDisclosure;

const UNKNOWN_TICKET: &str = "33333333-3333-4333-8333-333333333333";

fn create_request(body: Value) -> TestRequest {
    TestRequest::post().uri("/api/tickets").set_json(body)
}

#[actix_web::test]
async fn created_ticket_is_owned_by_caller_and_readable() {
    let app = init_app(StackDisclosure::Visible).await;
    let alice = sign_in_as(&app, ALICE).await;

    let res = test::call_service(
        &app,
        create_request(json!({"product": "iPhone", "description": "Screen cracked"}))
            .cookie(alice.clone())
            .to_request(),
    )
    .await;
    let (status, created) = json_response(res).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["ticket"]["user"], ALICE);
    assert_eq!(created["ticket"]["status"], "new");
    assert_eq!(
        created["ticket"]["createdAt"],
        created["ticket"]["updatedAt"]
    );

    let id = created["ticket"]["id"].as_str().expect("ticket id");
    let res = test::call_service(
        &app,
        TestRequest::get()
            .uri(&format!("/api/tickets/{id}"))
            .cookie(alice)
            .to_request(),
    )
    .await;
    let (status, fetched) = json_response(res).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["ticket"]["product"], "iPhone");
    assert_eq!(fetched["ticket"]["description"], "Screen cracked");
    assert_eq!(fetched["ticket"]["status"], "new");
}

#[actix_web::test]
async fn list_only_shows_the_callers_tickets() {
    let app = init_app(StackDisclosure::Visible).await;
    let alice = sign_in_as(&app, ALICE).await;
    let bob = sign_in_as(&app, BOB).await;

    for description in ["Battery drains", "Speaker crackles"] {
        let res = test::call_service(
            &app,
            create_request(json!({"product": "iPad", "description": description}))
                .cookie(alice.clone())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = test::call_service(
        &app,
        TestRequest::get()
            .uri("/api/tickets")
            .cookie(alice)
            .to_request(),
    )
    .await;
    let (_, alice_list) = json_response(res).await;
    let descriptions: Vec<&str> = alice_list["tickets"]
        .as_array()
        .expect("tickets array")
        .iter()
        .filter_map(|ticket| ticket["description"].as_str())
        .collect();
    assert_eq!(descriptions.len(), 2);
    assert!(descriptions.contains(&"Battery drains"));

    let res = test::call_service(
        &app,
        TestRequest::get().uri("/api/tickets").cookie(bob).to_request(),
    )
    .await;
    let (status, bob_list) = json_response(res).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bob_list, json!({"tickets": []}));
}

#[rstest]
#[case("GET")]
#[case("PUT")]
#[case("DELETE")]
#[actix_web::test]
async fn another_users_ticket_is_unauthorized(#[case] method: &str) {
    let app = init_app(StackDisclosure::Visible).await;
    let alice = sign_in_as(&app, ALICE).await;
    let bob = sign_in_as(&app, BOB).await;

    let res = test::call_service(
        &app,
        create_request(json!({"product": "iPhone", "description": "Screen cracked"}))
            .cookie(alice.clone())
            .to_request(),
    )
    .await;
    let (_, created) = json_response(res).await;
    let uri = format!(
        "/api/tickets/{}",
        created["ticket"]["id"].as_str().expect("ticket id")
    );

    let request = match method {
        "GET" => TestRequest::get(),
        "PUT" => TestRequest::put().set_json(json!({"status": "closed"})),
        _ => TestRequest::delete(),
    };
    let res = test::call_service(&app, request.uri(&uri).cookie(bob).to_request()).await;
    let (status, body) = json_response(res).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["message"], "Not authorized");

    let res = test::call_service(
        &app,
        TestRequest::get().uri(&uri).cookie(alice).to_request(),
    )
    .await;
    let (status, still_there) = json_response(res).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(still_there["ticket"]["status"], "new");
}

#[rstest]
#[case("GET")]
#[case("PUT")]
#[case("DELETE")]
#[actix_web::test]
async fn unknown_ticket_is_not_found(#[case] method: &str) {
    let app = init_app(StackDisclosure::Visible).await;
    let alice = sign_in_as(&app, ALICE).await;

    let request = match method {
        "GET" => TestRequest::get(),
        "PUT" => TestRequest::put().set_json(json!({"status": "open"})),
        _ => TestRequest::delete(),
    };
    let res = test::call_service(
        &app,
        request
            .uri(&format!("/api/tickets/{UNKNOWN_TICKET}"))
            .cookie(alice)
            .to_request(),
    )
    .await;
    let (status, body) = json_response(res).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["message"], "Ticket not found");
}

#[rstest]
#[case(json!({"description": "Screen cracked"}), json!(["product"]))]
#[case(json!({"product": "iPhone"}), json!(["description"]))]
#[case(json!({"product": "", "description": "  "}), json!(["product", "description"]))]
#[actix_web::test]
async fn create_without_required_fields_is_bad_request(
    #[case] body: Value,
    #[case] missing: Value,
) {
    let app = init_app(StackDisclosure::Visible).await;
    let alice = sign_in_as(&app, ALICE).await;

    let res = test::call_service(&app, create_request(body).cookie(alice).to_request()).await;
    let (status, payload) = json_response(res).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["code"], "invalid_request");
    assert_eq!(payload["message"], "Missing fields");
    assert_eq!(payload["details"]["fields"], missing);
}

#[actix_web::test]
async fn update_then_delete_round_trip() {
    let app = init_app(StackDisclosure::Visible).await;
    let alice = sign_in_as(&app, ALICE).await;

    let res = test::call_service(
        &app,
        create_request(json!({"product": "Macbook", "description": "Keyboard sticky"}))
            .cookie(alice.clone())
            .to_request(),
    )
    .await;
    let (_, created) = json_response(res).await;
    let uri = format!(
        "/api/tickets/{}",
        created["ticket"]["id"].as_str().expect("ticket id")
    );

    let res = test::call_service(
        &app,
        TestRequest::put()
            .uri(&uri)
            .cookie(alice.clone())
            .set_json(json!({"status": "open", "user": BOB}))
            .to_request(),
    )
    .await;
    let (status, updated) = json_response(res).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["updatedTicket"]["status"], "open");
    assert_eq!(updated["updatedTicket"]["user"], ALICE);
    assert_eq!(updated["updatedTicket"]["description"], "Keyboard sticky");

    let res = test::call_service(
        &app,
        TestRequest::delete()
            .uri(&uri)
            .cookie(alice.clone())
            .to_request(),
    )
    .await;
    let (status, deleted) = json_response(res).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({"success": true}));

    let res = test::call_service(
        &app,
        TestRequest::get().uri(&uri).cookie(alice).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case(StackDisclosure::Visible, false)]
#[case(StackDisclosure::Hidden, true)]
#[actix_web::test]
async fn anonymous_requests_are_rejected_with_envelope(
    #[case] disclosure: StackDisclosure,
    #[case] stack_is_null: bool,
) {
    let app = init_app(disclosure).await;
    let res = test::call_service(&app, TestRequest::get().uri("/api/tickets").to_request()).await;
    assert!(res.headers().contains_key("trace-id"));
    let (status, body) = json_response(res).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["stack"].is_null(), stack_is_null);
}

#[actix_web::test]
async fn fixture_login_grants_access_to_tickets() {
    let app = init_app(StackDisclosure::Visible).await;
    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({"email": "admin@example.com", "password": "password"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res);

    let res = test::call_service(
        &app,
        create_request(json!({"product": "iMac", "description": "No display"}))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn unmatched_route_is_json_not_found() {
    let app = init_app(StackDisclosure::Hidden).await;
    let res = test::call_service(&app, TestRequest::get().uri("/api/unknown").to_request()).await;
    let (status, body) = json_response(res).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[case(json!({"status": 3}))]
#[case(json!({"product": ["iPhone"], "description": false}))]
#[case(json!(["not", "an", "object"]))]
#[actix_web::test]
async fn foreign_patch_is_unauthorized_whatever_its_shape(#[case] patch: Value) {
    let app = init_app(StackDisclosure::Visible).await;
    let alice = sign_in_as(&app, ALICE).await;
    let bob = sign_in_as(&app, BOB).await;

    let res = test::call_service(
        &app,
        create_request(json!({"product": "iPhone", "description": "Screen cracked"}))
            .cookie(alice)
            .to_request(),
    )
    .await;
    let (_, created) = json_response(res).await;
    let uri = format!(
        "/api/tickets/{}",
        created["ticket"]["id"].as_str().expect("ticket id")
    );

    let res = test::call_service(
        &app,
        TestRequest::put()
            .uri(&uri)
            .cookie(bob)
            .set_json(patch)
            .to_request(),
    )
    .await;
    let (status, body) = json_response(res).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized");
}

#[actix_web::test]
async fn owner_patch_with_wrong_type_is_bad_request() {
    let app = init_app(StackDisclosure::Visible).await;
    let alice = sign_in_as(&app, ALICE).await;

    let res = test::call_service(
        &app,
        create_request(json!({"product": "iPhone", "description": "Screen cracked"}))
            .cookie(alice.clone())
            .to_request(),
    )
    .await;
    let (_, created) = json_response(res).await;
    let uri = format!(
        "/api/tickets/{}",
        created["ticket"]["id"].as_str().expect("ticket id")
    );

    let res = test::call_service(
        &app,
        TestRequest::put()
            .uri(&uri)
            .cookie(alice)
            .set_json(json!({"status": 3}))
            .to_request(),
    )
    .await;
    let (status, body) = json_response(res).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "status");
}

#[actix_web::test]
async fn login_without_body_answers_placeholder_but_grants_nothing() {
    let app = init_app(StackDisclosure::Visible).await;
    let res = test::call_service(
        &app,
        TestRequest::post().uri("/api/users/login").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        !res.response()
            .cookies()
            .any(|cookie| cookie.name() == "session")
    );
    assert_eq!(test::read_body(res).await, "Login Route");

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(test::read_body(res).await, "Login Route");
}
