//! Integration tests for the user profile API.
//!
//! Drives the full router against the in-memory repository and asserts on
//! status codes, response envelopes, and the error body shape.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Datelike, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use userhub::database::queries::InMemoryUserRepository;
use userhub::services::user_service::UserService;
use userhub::services::validator::UserValidator;
use userhub::{app, AppState};

fn test_app() -> Router {
    let state = AppState {
        user_service: UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            UserValidator::new(18),
        ),
    };
    app(state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn adult_birth_date() -> String {
    format!("{}-02-13", Utc::now().year() - 34)
}

fn create_body(email: &str) -> Value {
    json!({
        "email": email,
        "firstName": "John",
        "lastName": "Doe",
        "birthDate": adult_birth_date(),
        "address": "some address",
        "phoneNumber": "380999999999"
    })
}

#[tokio::test]
async fn create_user_returns_created_record() {
    let app = test_app();

    let (status, body) = send(&app, Method::POST, "/users", Some(create_body("email@google.com"))).await;

    assert_eq!(status, StatusCode::CREATED);
    let data = &body["data"];
    assert!(data["id"].is_string());
    assert_eq!(data["email"], "email@google.com");
    assert_eq!(data["firstName"], "John");
    assert_eq!(data["lastName"], "Doe");
    assert_eq!(data["birthDate"], adult_birth_date());
    assert_eq!(data["phoneNumber"], "380999999999");
}

#[tokio::test]
async fn create_user_under_age_is_rejected() {
    let app = test_app();
    let mut body = create_body("email@google.com");
    body["birthDate"] = json!(format!("{}-02-13", Utc::now().year() - 10));

    let (status, body) = send(&app, Method::POST, "/users", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "Bad Request");
    assert_eq!(body["errors"]["error"], "User is not old enough to register");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn create_user_with_bad_fields_reports_each_field() {
    let app = test_app();
    let mut body = create_body("not-an-email");
    body["phoneNumber"] = json!("12-34");

    let (status, body) = send(&app, Method::POST, "/users", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["email"], "Invalid email format");
    assert_eq!(
        body["errors"]["phoneNumber"],
        "Invalid phone number format. Only numbers and '+' are allowed"
    );
}

#[tokio::test]
async fn create_user_with_duplicate_email_conflicts() {
    let app = test_app();
    send(&app, Method::POST, "/users", Some(create_body("email@google.com"))).await;

    let (status, body) = send(&app, Method::POST, "/users", Some(create_body("email@google.com"))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "Conflict");
    assert_eq!(
        body["errors"]["error"],
        "User with email email@google.com already exists"
    );
}

#[tokio::test]
async fn get_unknown_user_is_not_found() {
    let app = test_app();
    let id = "e85bcd9a-00ed-45d3-87c9-ac0c8ad68203";

    let (status, body) = send(&app, Method::GET, &format!("/users/{id}"), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "Not Found");
    assert_eq!(body["errors"]["error"], format!("User {id} not found"));
}

#[tokio::test]
async fn put_replaces_supplied_fields() {
    let app = test_app();
    let (_, created) = send(&app, Method::POST, "/users", Some(create_body("old@x.com"))).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/users/{id}"),
        Some(json!({
            "email": "new@x.com",
            "firstName": "Jane",
            "lastName": "Smith",
            "birthDate": adult_birth_date(),
            "address": "new address",
            "phoneNumber": "+380111111111"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["email"], "new@x.com");
    assert_eq!(body["data"]["firstName"], "Jane");
    assert_eq!(body["data"]["address"], "new address");
}

#[tokio::test]
async fn patch_leaves_absent_fields_untouched() {
    let app = test_app();
    let (_, created) = send(&app, Method::POST, "/users", Some(create_body("old@x.com"))).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/users/{id}"),
        Some(json!({ "email": "new@x.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "new@x.com");
    assert_eq!(body["data"]["firstName"], "John");
    assert_eq!(body["data"]["lastName"], "Doe");
    assert_eq!(body["data"]["address"], "some address");

    // The stored record reflects the merge.
    let (_, fetched) = send(&app, Method::GET, &format!("/users/{id}"), None).await;
    assert_eq!(fetched["data"]["email"], "new@x.com");
    assert_eq!(fetched["data"]["firstName"], "John");
}

#[tokio::test]
async fn patch_with_invalid_phone_is_rejected_before_merge() {
    let app = test_app();
    let (_, created) = send(&app, Method::POST, "/users", Some(create_body("old@x.com"))).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/users/{id}"),
        Some(json!({ "phoneNumber": "123" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"]["phoneNumber"],
        "Invalid phone number format. Only numbers and '+' are allowed"
    );

    let (_, fetched) = send(&app, Method::GET, &format!("/users/{id}"), None).await;
    assert_eq!(fetched["data"]["phoneNumber"], "380999999999");
}

#[tokio::test]
async fn update_unknown_user_is_not_found() {
    let app = test_app();

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/users/e85bcd9a-00ed-45d3-87c9-ac0c8ad68203",
        Some(json!({ "email": "new@x.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_user_returns_no_content_then_not_found() {
    let app = test_app();
    let (_, created) = send(&app, Method::POST, "/users", Some(create_body("email@google.com"))).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::DELETE, &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_returns_users_within_inclusive_range() {
    let app = test_app();
    let year = Utc::now().year();
    for (email, birth_year) in [
        ("a@x.com", year - 36),
        ("b@x.com", year - 34),
        ("c@x.com", year - 20),
    ] {
        let mut body = create_body(email);
        body["birthDate"] = json!(format!("{birth_year}-02-13"));
        send(&app, Method::POST, "/users", Some(body)).await;
    }

    let from = format!("{}-01-01", year - 37);
    let to = format!("{}-12-31", year - 34);
    let (status, body) = send(&app, Method::GET, &format!("/users?from={from}&to={to}"), None).await;

    assert_eq!(status, StatusCode::OK);
    let mut emails: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["email"].as_str().unwrap())
        .collect();
    emails.sort_unstable();
    assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
}

#[tokio::test]
async fn search_with_inverted_range_is_rejected() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::GET,
        "/users?from=1995-01-01&to=1990-01-01",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "Bad Request");
    assert_eq!(
        body["errors"]["error"],
        "Invalid date range. Start date must be before or equal to end date"
    );
    assert!(body["timestamp"].is_string());
}
