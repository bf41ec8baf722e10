use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use evslot_api::middleware::{
    auth::{bearer_token, IdentityProvider, JwtIdentity},
    error_handling::map_error,
};
use evslot_core::errors::SlotError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::{token_for, TestContext, TEST_SECRET};

#[rstest]
#[case(SlotError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(SlotError::PastSlot, StatusCode::BAD_REQUEST)]
#[case(SlotError::SlotUnavailable, StatusCode::BAD_REQUEST)]
#[case(SlotError::NotFound("Booking not found.".to_string()), StatusCode::NOT_FOUND)]
#[case(SlotError::Authentication("Invalid token".to_string()), StatusCode::UNAUTHORIZED)]
#[case(SlotError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(SlotError::internal("Internal error"), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: SlotError, #[case] status: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), status);
}

#[test]
fn test_bearer_token_parsing() {
    assert_eq!(bearer_token(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    assert!(matches!(
        bearer_token(Some("Bearer ")),
        Err(SlotError::Authentication(message)) if message == "No token provided"
    ));
    for malformed in [None, Some("Basic dXNlcjpwdw=="), Some("abc.def.ghi")] {
        assert!(matches!(
            bearer_token(malformed),
            Err(SlotError::Authentication(message)) if message == "Invalid token format"
        ));
    }
}

#[test]
fn test_jwt_identity_verifies_signature_and_expiry() {
    let identity = JwtIdentity::new(TEST_SECRET);

    assert_eq!(identity.verify(&token_for("user-1", TEST_SECRET, 3600)).unwrap(), "user-1");
    assert!(matches!(
        identity.verify(&token_for("user-1", "other-secret", 3600)),
        Err(SlotError::Authentication(_))
    ));
    assert!(matches!(
        identity.verify(&token_for("user-1", TEST_SECRET, -3600)),
        Err(SlotError::Authentication(_))
    ));
    assert!(identity.verify("not-a-token").is_err());
}

#[tokio::test]
async fn test_missing_header_is_invalid_format() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/getallbookings").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "message": "Invalid token format" })
    );
}

#[tokio::test]
async fn test_empty_bearer_is_no_token() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/getallbookings")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer "))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "message": "No token provided" })
    );
}

#[tokio::test]
async fn test_bad_token_is_rejected_before_any_write() {
    let ctx = TestContext::new();
    let forged = format!("Bearer {}", token_for("user-1", "other-secret", 3600));

    let response = ctx
        .server
        .post("/book")
        .add_header(AUTHORIZATION, HeaderValue::from_str(&forged).unwrap())
        .json(&json!({
            "connectorId": "ccs-1",
            "date": "18-10-2026",
            "startTime": "10:00",
            "endTime": "11:00",
            "stationId": "station-1",
            "stationName": "Central Plaza",
            "stationImage": "central.png",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["message"], json!("Invalid token"));
    assert!(ctx.repository.is_empty().await);
}

#[tokio::test]
async fn test_availability_needs_no_token() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/available")
        .add_query_param("stationId", "station-1")
        .add_query_param("connectorId", "ccs-1")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_reports_catalog() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "status": "ok", "slotCount": 13 }));
}
