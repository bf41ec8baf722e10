use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, StatusCode};
use evslot_core::errors::SlotError;
use evslot_db::mock::repositories::MockBookingRepo;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{bearer, build_server, local, TestContext};

fn booking_body(date: &str, start: &str, end: &str) -> Value {
    json!({
        "connectorId": "ccs-1",
        "date": date,
        "startTime": start,
        "endTime": end,
        "stationId": "station-1",
        "stationName": "Central Plaza",
        "stationImage": "https://img.example/central.png",
    })
}

#[tokio::test]
async fn test_book_slot_created() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/book")
        .add_header(AUTHORIZATION, bearer("user-1"))
        .json(&booking_body("17-10-2026", "10:00", "11:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Slot booked successfully"));
    assert_eq!(body["slot"]["stationId"], json!("station-1"));
    assert_eq!(body["slot"]["userId"], json!("user-1"));
    assert_eq!(body["slot"]["startTime"], json!("10:00"));
    assert_eq!(body["slot"]["date"], json!("2026-10-17T00:00:00Z"));
    assert!(body["slot"]["_id"].is_string());
    assert_eq!(ctx.repository.len().await, 1);
}

#[tokio::test]
async fn test_book_same_slot_twice() {
    let ctx = TestContext::new();
    let body = booking_body("18-10-2026", "10:00", "11:00");

    ctx.server
        .post("/book")
        .add_header(AUTHORIZATION, bearer("user-1"))
        .json(&body)
        .await;
    let response = ctx
        .server
        .post("/book")
        .add_header(AUTHORIZATION, bearer("user-2"))
        .json(&body)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "The selected time slot is unavailable for this connector.",
        })
    );
    assert_eq!(ctx.repository.len().await, 1);
}

#[tokio::test]
async fn test_book_past_slot() {
    let ctx = TestContext::at(local(14, 0));

    let response = ctx
        .server
        .post("/book")
        .add_header(AUTHORIZATION, bearer("user-1"))
        .json(&booking_body("17-10-2026", "13:00", "14:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], json!("You cannot book a past time slot."));
    assert!(ctx.repository.is_empty().await);
}

#[tokio::test]
async fn test_book_with_malformed_date() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/book")
        .add_header(AUTHORIZATION, bearer("user-1"))
        .json(&booking_body("2026-10-17", "10:00", "11:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["success"], json!(false));
}

#[tokio::test]
async fn test_get_all_bookings_not_found_when_empty() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/getallbookings")
        .add_header(AUTHORIZATION, bearer("user-1"))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "message": "No bookings found." })
    );
}

#[tokio::test]
async fn test_get_all_bookings_sorted_newest_first() {
    let ctx = TestContext::new();
    for (date, start, end) in [
        ("17-10-2026", "10:00", "11:00"),
        ("18-10-2026", "09:00", "10:00"),
        ("17-10-2026", "15:00", "16:00"),
    ] {
        ctx.server
            .post("/book")
            .add_header(AUTHORIZATION, bearer("user-1"))
            .json(&booking_body(date, start, end))
            .await;
    }

    let response = ctx
        .server
        .get("/getallbookings")
        .add_header(AUTHORIZATION, bearer("user-1"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let starts: Vec<&str> = body["bookings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["startTime"].as_str().unwrap())
        .collect();
    assert_eq!(starts, vec!["09:00", "15:00", "10:00"]);
    assert_eq!(body["message"], json!("Booking details retrieved successfully."));
}

#[tokio::test]
async fn test_update_booking_replaces_range() {
    let ctx = TestContext::new();
    let created: Value = ctx
        .server
        .post("/book")
        .add_header(AUTHORIZATION, bearer("user-1"))
        .json(&booking_body("18-10-2026", "10:00", "11:00"))
        .await
        .json();
    let id = created["slot"]["_id"].as_str().unwrap().to_string();

    let response = ctx
        .server
        .put(&format!("/updatetheBooking/{id}"))
        .add_header(AUTHORIZATION, bearer("user-1"))
        .json(&json!({ "startTime": "12:00 PM - 01:00 PM" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], json!("Booking updated successfully."));
    assert_eq!(body["booking"]["startTime"], json!("12:00 PM"));
    assert_eq!(body["booking"]["endTime"], json!("01:00 PM"));
}

#[tokio::test]
async fn test_update_foreign_booking_not_found() {
    let ctx = TestContext::new();
    let created: Value = ctx
        .server
        .post("/book")
        .add_header(AUTHORIZATION, bearer("user-1"))
        .json(&booking_body("18-10-2026", "10:00", "11:00"))
        .await
        .json();
    let id = created["slot"]["_id"].as_str().unwrap().to_string();

    let response = ctx
        .server
        .put(&format!("/updatetheBooking/{id}"))
        .add_header(AUTHORIZATION, bearer("intruder"))
        .json(&json!({ "startTime": "12:00 PM - 01:00 PM" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], json!("Booking not found."));
}

#[tokio::test]
async fn test_delete_booking() {
    let ctx = TestContext::new();
    let created: Value = ctx
        .server
        .post("/book")
        .add_header(AUTHORIZATION, bearer("user-1"))
        .json(&booking_body("18-10-2026", "10:00", "11:00"))
        .await
        .json();
    let id = created["slot"]["_id"].as_str().unwrap().to_string();

    let foreign = ctx
        .server
        .delete(&format!("/deletetheBooking/{id}"))
        .add_header(AUTHORIZATION, bearer("intruder"))
        .await;
    assert_eq!(foreign.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        foreign.json::<Value>()["message"],
        json!("Booking not found or does not belong to the user.")
    );
    assert_eq!(ctx.repository.len().await, 1);

    let own = ctx
        .server
        .delete(&format!("/deletetheBooking/{id}"))
        .add_header(AUTHORIZATION, bearer("user-1"))
        .await;
    assert_eq!(own.status_code(), StatusCode::OK);
    assert_eq!(
        own.json::<Value>(),
        json!({ "success": true, "message": "Booking deleted successfully." })
    );
    assert!(ctx.repository.is_empty().await);
}

#[tokio::test]
async fn test_delete_unknown_id() {
    let ctx = TestContext::new();

    for id in [Uuid::new_v4().to_string(), "not-an-id".to_string()] {
        let response = ctx
            .server
            .delete(&format!("/deletetheBooking/{id}"))
            .add_header(AUTHORIZATION, bearer("user-1"))
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_book_with_incomplete_body() {
    let ctx = TestContext::new();
    let mut body = booking_body("18-10-2026", "10:00", "11:00");
    body.as_object_mut().unwrap().remove("stationName");

    let response = ctx
        .server
        .post("/book")
        .add_header(AUTHORIZATION, bearer("user-1"))
        .json(&body)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], json!(false));
    assert!(body["message"].as_str().unwrap().contains("stationName"));
    assert!(ctx.repository.is_empty().await);
}

#[tokio::test]
async fn test_update_without_range() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .put(&format!("/updatetheBooking/{}", Uuid::new_v4()))
        .add_header(AUTHORIZATION, bearer("user-1"))
        .json(&json!({}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], json!(false));
    assert!(body["message"].as_str().unwrap().contains("startTime"));
}

#[tokio::test]
async fn test_update_onto_another_bookings_range() {
    let ctx = TestContext::new();
    ctx.server
        .post("/book")
        .add_header(AUTHORIZATION, bearer("user-2"))
        .json(&booking_body("18-10-2026", "12:00 PM", "01:00 PM"))
        .await;
    let created: Value = ctx
        .server
        .post("/book")
        .add_header(AUTHORIZATION, bearer("user-1"))
        .json(&booking_body("18-10-2026", "10:00", "11:00"))
        .await
        .json();
    let id = created["slot"]["_id"].as_str().unwrap().to_string();

    let response = ctx
        .server
        .put(&format!("/updatetheBooking/{id}"))
        .add_header(AUTHORIZATION, bearer("user-1"))
        .json(&json!({ "startTime": "12:00 PM - 01:00 PM" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": false,
            "message": "The selected time slot is unavailable for this connector.",
        })
    );
}

#[tokio::test]
async fn test_storage_failures_name_the_operation() {
    let mut repo = MockBookingRepo::new();
    repo.expect_find_by_user()
        .returning(|_| Err(SlotError::Database(eyre::eyre!("connection reset"))));
    repo.expect_find_owned()
        .returning(|_, _| Err(SlotError::Database(eyre::eyre!("connection reset"))));
    let server = build_server(Arc::new(repo), local(8, 0));
    let id = Uuid::new_v4();

    let list = server
        .get("/getallbookings")
        .add_header(AUTHORIZATION, bearer("user-1"))
        .await;
    let update = server
        .put(&format!("/updatetheBooking/{id}"))
        .add_header(AUTHORIZATION, bearer("user-1"))
        .json(&json!({ "startTime": "12:00 PM - 01:00 PM" }))
        .await;
    let delete = server
        .delete(&format!("/deletetheBooking/{id}"))
        .add_header(AUTHORIZATION, bearer("user-1"))
        .await;

    for (response, message) in [
        (list, "An error occurred while fetching booking details."),
        (update, "An error occurred while updating the booking."),
        (delete, "An error occurred while deleting the booking."),
    ] {
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["message"], json!(message));
        assert!(body["error"].as_str().unwrap().contains("connection reset"));
    }
}
