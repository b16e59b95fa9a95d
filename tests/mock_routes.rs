use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode},
};
use chrono::{FixedOffset, TimeZone};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use todo_api::{
    auth::jwt::{encode_token, make_claims},
    db::entities::todo,
    state::JwtKeys,
    test_helpers::{test_router, test_router_with_db},
};

const SECRET: &[u8] = b"mock-routes-secret";

fn auth_header(user_id: &Uuid) -> String {
    let claims = make_claims(user_id, 3600);
    let keys = JwtKeys::from_secret(SECRET);
    let token = encode_token(&keys, &claims).expect("encode token");
    format!("Bearer {token}")
}

fn ts() -> chrono::DateTime<chrono::FixedOffset> {
    FixedOffset::east_opt(0)
        .expect("offset should be valid")
        .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .expect("timestamp should be valid")
}

fn todo_model(id: Uuid, owner_id: Uuid, title: &str, is_completed: bool) -> todo::Model {
    let now = ts();
    todo::Model {
        id,
        title: title.to_string(),
        description: None,
        is_completed,
        owner_id,
        created_at: now,
        updated_at: now,
    }
}

async fn json_response(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.expect("request should succeed");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("body should be json");
    (status, json)
}

#[tokio::test]
async fn todos_require_auth_header() {
    let (status, json) = json_response(
        test_router(SECRET),
        Request::builder()
            .uri("/todos")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Missing/invalid Authorization header");
}

#[tokio::test]
async fn todos_reject_garbage_token() {
    let (status, json) = json_response(
        test_router(SECRET),
        Request::builder()
            .uri("/todos")
            .header("authorization", "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Invalid or expired token");
}

#[tokio::test]
async fn create_without_title_is_rejected_before_the_store() {
    let caller = Uuid::new_v4();
    // Empty mock: any store round-trip would fail the request with a 500.
    let (status, json) = json_response(
        test_router(SECRET),
        Request::builder()
            .method("POST")
            .uri("/todos")
            .header("authorization", auth_header(&caller))
            .header("content-type", "application/json")
            .body(Body::from(json!({}).to_string()))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Please provide a title");
}

#[tokio::test]
async fn create_returns_envelope_with_record() {
    let caller = Uuid::new_v4();
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[todo_model(id, caller, "Buy milk", false)]])
        .into_connection();

    let (status, json) = json_response(
        test_router_with_db(SECRET, db),
        Request::builder()
            .method("POST")
            .uri("/todos")
            .header("authorization", auth_header(&caller))
            .header("content-type", "application/json")
            .body(Body::from(json!({ "title": "Buy milk" }).to_string()))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Todo created successfully");
    assert_eq!(json["data"]["title"], "Buy milk");
    assert_eq!(json["data"]["isCompleted"], false);
    assert_eq!(json["data"]["ownerId"], caller.to_string());
}

#[tokio::test]
async fn get_missing_todo_is_not_found() {
    let caller = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<todo::Model>::new()])
        .into_connection();

    let (status, json) = json_response(
        test_router_with_db(SECRET, db),
        Request::builder()
            .uri(format!("/todos/{}", Uuid::new_v4()))
            .header("authorization", auth_header(&caller))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Todo not found");
}

#[tokio::test]
async fn get_other_owners_todo_is_forbidden() {
    let caller = Uuid::new_v4();
    let other = Uuid::new_v4();
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[todo_model(id, other, "Buy milk", false)]])
        .into_connection();

    let (status, json) = json_response(
        test_router_with_db(SECRET, db),
        Request::builder()
            .uri(format!("/todos/{id}"))
            .header("authorization", auth_header(&caller))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Not authorized to access this todo");
}

#[tokio::test]
async fn list_reports_count_with_data() {
    let caller = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            todo_model(Uuid::new_v4(), caller, "Second", false),
            todo_model(Uuid::new_v4(), caller, "First", true),
        ]])
        .into_connection();

    let (status, json) = json_response(
        test_router_with_db(SECRET, db),
        Request::builder()
            .uri("/todos")
            .header("authorization", auth_header(&caller))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 2);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_ignores_owner_field_in_payload() {
    let caller = Uuid::new_v4();
    let id = Uuid::new_v4();
    let before = todo_model(id, caller, "Buy milk", false);
    let after = todo::Model {
        title: "Buy oat milk".to_string(),
        ..before.clone()
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![before], vec![after]])
        .into_connection();

    let (status, json) = json_response(
        test_router_with_db(SECRET, db),
        Request::builder()
            .method("PUT")
            .uri(format!("/todos/{id}"))
            .header("authorization", auth_header(&caller))
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "title": "Buy oat milk", "ownerId": Uuid::new_v4() }).to_string(),
            ))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Todo updated successfully");
    assert_eq!(json["data"]["title"], "Buy oat milk");
    assert_eq!(json["data"]["ownerId"], caller.to_string());
}

#[tokio::test]
async fn toggle_returns_flipped_record() {
    let caller = Uuid::new_v4();
    let id = Uuid::new_v4();
    let before = todo_model(id, caller, "Buy milk", false);
    let after = todo::Model {
        is_completed: true,
        ..before.clone()
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![before], vec![after]])
        .into_connection();

    let (status, json) = json_response(
        test_router_with_db(SECRET, db),
        Request::builder()
            .method("PATCH")
            .uri(format!("/todos/{id}/toggle"))
            .header("authorization", auth_header(&caller))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Todo status updated");
    assert_eq!(json["data"]["isCompleted"], true);
}

#[tokio::test]
async fn delete_returns_empty_object() {
    let caller = Uuid::new_v4();
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[todo_model(id, caller, "Buy milk", false)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let (status, json) = json_response(
        test_router_with_db(SECRET, db),
        Request::builder()
            .method("DELETE")
            .uri(format!("/todos/{id}"))
            .header("authorization", auth_header(&caller))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Todo deleted successfully");
    assert_eq!(json["data"], json!({}));
}
