#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use db::{ConnectOpts, DbHandle, RequestCtx};
use users_info::api::rest::RequestScope;
use users_info::UsersInfo;

/// Fresh in-memory SQLite database with the users table in place.
pub async fn memory_db() -> Arc<DbHandle> {
    let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default())
        .await
        .expect("connect in-memory sqlite");
    Arc::new(db)
}

pub async fn users_module() -> UsersInfo {
    UsersInfo::init(memory_db().await, &RequestCtx::background())
        .await
        .expect("init users_info")
}

pub fn router(module: &UsersInfo) -> Router {
    module.register_rest(Router::new(), RequestScope::default())
}

pub async fn app() -> Router {
    router(&users_module().await)
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: axum::response::Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
