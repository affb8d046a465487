//! Tests for the ticket service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockTicketRepository, MockUserRepository};
use crate::domain::{ErrorCode, Product, TicketDraft, TicketStatus};

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn opened_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 2, 8, 15, 0)
        .single()
        .expect("valid timestamp")
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 3, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn make_service(
    tickets: MockTicketRepository,
    users: MockUserRepository,
) -> TicketService<MockTicketRepository, MockUserRepository> {
    TicketService::new(Arc::new(tickets), Arc::new(users), Arc::new(FixedClock(now())))
}

fn user(id: UserId) -> User {
    User::try_new(id, "Ada Lovelace", "ada@example.com").expect("valid user")
}

fn users_with(id: UserId) -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |requested| Ok((*requested == id).then(|| user(id))));
    users
}

fn users_without_records() -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));
    users
}

fn ticket_for(owner: UserId) -> Ticket {
    let draft =
        TicketDraft::try_from_parts(Some("iPhone"), Some("Screen cracked")).expect("valid draft");
    Ticket::open(TicketId::random(), owner, draft, opened_at())
}

#[fixture]
fn caller() -> UserId {
    UserId::random()
}

#[rstest]
#[tokio::test]
async fn list_returns_repository_tickets(caller: UserId) {
    let owned = vec![ticket_for(caller), ticket_for(caller)];
    let expected = owned.clone();
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_list_by_owner()
        .withf(move |owner| *owner == caller)
        .times(1)
        .return_once(move |_| Ok(owned));

    let service = make_service(tickets, users_with(caller));
    let listed = service.list(&caller).await.expect("list succeeds");
    assert_eq!(listed, expected);
}

#[rstest]
#[tokio::test]
async fn list_rejects_unknown_caller_before_reading_tickets(caller: UserId) {
    let mut tickets = MockTicketRepository::new();
    tickets.expect_list_by_owner().never();

    let service = make_service(tickets, users_without_records());
    let err = service.list(&caller).await.expect_err("unknown caller");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), CALLER_NOT_AUTHORIZED);
}

#[rstest]
#[tokio::test]
async fn get_checks_caller_before_ticket_lookup(caller: UserId) {
    let mut tickets = MockTicketRepository::new();
    tickets.expect_find_by_id().never();

    let service = make_service(tickets, users_without_records());
    let err = service
        .get(TicketRequest {
            user_id: caller,
            ticket_id: None,
        })
        .await
        .expect_err("unknown caller");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), UNAUTHORIZED_TOKEN);
}

#[rstest]
#[case::unknown_id(Some(TicketId::random()))]
#[case::malformed_id(None)]
#[tokio::test]
async fn get_reports_missing_ticket(caller: UserId, #[case] ticket_id: Option<TicketId>) {
    let mut tickets = MockTicketRepository::new();
    tickets.expect_find_by_id().returning(|_| Ok(None));

    let service = make_service(tickets, users_with(caller));
    let err = service
        .get(TicketRequest {
            user_id: caller,
            ticket_id,
        })
        .await
        .expect_err("missing ticket");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), TICKET_NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn get_rejects_foreign_ticket(caller: UserId) {
    let foreign = ticket_for(UserId::random());
    let foreign_id = *foreign.id();
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(foreign)));

    let service = make_service(tickets, users_with(caller));
    let err = service
        .get(TicketRequest {
            user_id: caller,
            ticket_id: Some(foreign_id),
        })
        .await
        .expect_err("foreign ticket");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), "Not authorized");
}

#[rstest]
#[tokio::test]
async fn create_opens_new_ticket_owned_by_caller(caller: UserId) {
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_insert()
        .withf(move |ticket| *ticket.user() == caller && ticket.status() == TicketStatus::New)
        .times(1)
        .return_once(|_| Ok(()));

    let service = make_service(tickets, users_with(caller));
    let draft =
        TicketDraft::try_from_parts(Some("Macbook"), Some("Battery swelling")).expect("draft");
    let ticket = service
        .create(CreateTicketRequest {
            user_id: caller,
            draft,
        })
        .await
        .expect("create succeeds");

    assert_eq!(ticket.user(), &caller);
    assert_eq!(ticket.product(), Product::Macbook);
    assert_eq!(ticket.description(), "Battery swelling");
    assert_eq!(ticket.status(), TicketStatus::New);
    assert_eq!(ticket.created_at(), now());
    assert_eq!(ticket.updated_at(), now());
}

#[rstest]
#[tokio::test]
async fn create_rejects_unknown_caller(caller: UserId) {
    let mut tickets = MockTicketRepository::new();
    tickets.expect_insert().never();

    let service = make_service(tickets, users_without_records());
    let draft = TicketDraft::try_from_parts(Some("Other"), Some("Help")).expect("draft");
    let err = service
        .create(CreateTicketRequest {
            user_id: caller,
            draft,
        })
        .await
        .expect_err("unknown caller");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), UNAUTHORIZED_TOKEN);
}

#[rstest]
#[tokio::test]
async fn update_applies_changes_and_stamps_time(caller: UserId) {
    let existing = ticket_for(caller);
    let id = *existing.id();
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    tickets
        .expect_update()
        .withf(|ticket| ticket.status() == TicketStatus::Open)
        .times(1)
        .return_once(|_| Ok(true));

    let service = make_service(tickets, users_with(caller));
    let updated = service
        .update(UpdateTicketRequest {
            user_id: caller,
            ticket_id: Some(id),
            changes: TicketChanges {
                status: Some(json!("open")),
                ..TicketChanges::default()
            },
        })
        .await
        .expect("update succeeds");

    assert_eq!(updated.status(), TicketStatus::Open);
    assert_eq!(updated.product(), Product::IPhone);
    assert_eq!(updated.user(), &caller);
    assert_eq!(updated.created_at(), opened_at());
    assert_eq!(updated.updated_at(), now());
}

#[rstest]
#[tokio::test]
async fn update_with_no_changes_skips_write(caller: UserId) {
    let existing = ticket_for(caller);
    let id = *existing.id();
    let expected = existing.clone();
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    tickets.expect_update().never();

    let service = make_service(tickets, users_with(caller));
    let unchanged = service
        .update(UpdateTicketRequest {
            user_id: caller,
            ticket_id: Some(id),
            changes: TicketChanges::default(),
        })
        .await
        .expect("empty patch succeeds");
    assert_eq!(unchanged, expected);
}

#[rstest]
#[tokio::test]
async fn update_reports_foreign_ticket_before_invalid_changes(caller: UserId) {
    let foreign = ticket_for(UserId::random());
    let id = *foreign.id();
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(foreign)));
    tickets.expect_update().never();

    let service = make_service(tickets, users_with(caller));
    let err = service
        .update(UpdateTicketRequest {
            user_id: caller,
            ticket_id: Some(id),
            changes: TicketChanges {
                status: Some(json!(3)),
                ..TicketChanges::default()
            },
        })
        .await
        .expect_err("foreign ticket");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[case::product(Some(json!("Toaster")), None, None, "product")]
#[case::description(None, Some(json!("  ")), None, "description")]
#[case::status(None, None, Some(json!("archived")), "status")]
#[case::numeric_status(None, None, Some(json!(3)), "status")]
#[case::listed_product(Some(json!(["iPhone"])), None, None, "product")]
#[case::boolean_description(None, Some(json!(true)), None, "description")]
#[tokio::test]
async fn update_rejects_invalid_changes(
    caller: UserId,
    #[case] product: Option<Value>,
    #[case] description: Option<Value>,
    #[case] status: Option<Value>,
    #[case] field: &str,
) {
    let existing = ticket_for(caller);
    let id = *existing.id();
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    tickets.expect_update().never();

    let service = make_service(tickets, users_with(caller));
    let err = service
        .update(UpdateTicketRequest {
            user_id: caller,
            ticket_id: Some(id),
            changes: TicketChanges {
                product,
                description,
                status,
            },
        })
        .await
        .expect_err("invalid changes");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let details = err.details().expect("details present");
    assert_eq!(details["field"], field);
}

#[rstest]
#[tokio::test]
async fn update_reports_ticket_deleted_mid_flight(caller: UserId) {
    let existing = ticket_for(caller);
    let id = *existing.id();
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    tickets.expect_update().return_once(|_| Ok(false));

    let service = make_service(tickets, users_with(caller));
    let err = service
        .update(UpdateTicketRequest {
            user_id: caller,
            ticket_id: Some(id),
            changes: TicketChanges {
                description: Some(json!("Still broken")),
                ..TicketChanges::default()
            },
        })
        .await
        .expect_err("vanished ticket");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_removes_owned_ticket(caller: UserId) {
    let existing = ticket_for(caller);
    let id = *existing.id();
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(existing)));
    tickets
        .expect_delete()
        .withf(move |requested| *requested == id)
        .times(1)
        .return_once(|_| Ok(true));

    let service = make_service(tickets, users_with(caller));
    service
        .delete(TicketRequest {
            user_id: caller,
            ticket_id: Some(id),
        })
        .await
        .expect("delete succeeds");
}

#[rstest]
#[tokio::test]
async fn delete_rejects_foreign_ticket(caller: UserId) {
    let foreign = ticket_for(UserId::random());
    let id = *foreign.id();
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(foreign)));
    tickets.expect_delete().never();

    let service = make_service(tickets, users_with(caller));
    let err = service
        .delete(TicketRequest {
            user_id: caller,
            ticket_id: Some(id),
        })
        .await
        .expect_err("foreign ticket");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[case::connection(
    TicketRepositoryError::connection("refused"),
    ErrorCode::ServiceUnavailable
)]
#[case::query(TicketRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_failures_map_to_domain_errors(
    caller: UserId,
    #[case] failure: TicketRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_list_by_owner()
        .return_once(move |_| Err(failure));

    let service = make_service(tickets, users_with(caller));
    let err = service.list(&caller).await.expect_err("store failure");
    assert_eq!(err.code(), expected);
    assert!(err.cause().is_some());
}

#[rstest]
#[tokio::test]
async fn user_store_outage_is_service_unavailable(caller: UserId) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Err(UserPersistenceError::connection("timeout")));

    let service = make_service(MockTicketRepository::new(), users);
    let err = service.list(&caller).await.expect_err("user store down");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(err.cause(), Some("timeout"));
}
