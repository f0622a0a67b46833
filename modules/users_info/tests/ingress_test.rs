//! `/users` behind the full ingress stack: request id, trace, body limit.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::json;
use tower::ServiceExt;
use users_info::api::rest::RequestScope;

use common::{body_json, body_text, empty_request, json_request, users_module};

async fn ingress_app() -> Router {
    let users = users_module().await;
    api_ingress::build_router(users.register_rest(Router::new(), RequestScope::default()))
}

fn request_id(response: &axum::response::Response) -> String {
    response
        .headers()
        .get("x-request-id")
        .expect("x-request-id should be set")
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_user_lifecycle_through_ingress() {
    let app = ingress_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/users",
            json!({"name": "Ann", "email": "ann@x.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(!request_id(&response).is_empty());
    let created = body_json(response).await;
    let id = created["id"].as_i64().expect("numeric id");

    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, &format!("/users?id={id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!request_id(&response).is_empty());
    assert_eq!(body_json(response).await, created);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/users",
            json!({"id": id, "name": "Ann B", "email": "annb@x.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["name"], "Ann B");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let response = app
        .clone()
        .oneshot(empty_request(Method::DELETE, &format!("/users?id={id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!request_id(&response).is_empty());

    let response = app
        .oneshot(empty_request(Method::GET, &format!("/users?id={id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(!request_id(&response).is_empty());
    assert!(!body_text(response).await.is_empty());
}

#[tokio::test]
async fn test_client_request_id_is_echoed() {
    let app = ingress_app().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/users")
        .header("x-request-id", "client-abc")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(request_id(&response), "client-abc");
}

#[tokio::test]
async fn test_oversized_body_is_payload_too_large() {
    let app = ingress_app().await;

    let name = "a".repeat(api_ingress::BODY_LIMIT_BYTES + 1);
    let body = json!({"name": name, "email": "big@x.com"}).to_string();

    // No Content-Length header: the limit trips while the handler reads the body.
    let request = Request::builder()
        .method(Method::POST)
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let response = app
        .oneshot(empty_request(Method::GET, "/users"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!([]));
}
