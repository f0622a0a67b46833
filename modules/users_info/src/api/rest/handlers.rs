use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use tracing::{error, info, warn};

use crate::api::rest::dto::{require_name_and_email, CreateUserReq, IdQuery, UpdateUserReq, UserDto};
use crate::api::rest::error::error_response;
use crate::api::rest::scope::RequestScope;
use crate::contract::client::UsersInfoApi;
use crate::contract::error::UsersInfoError;

pub type UsersApi = Arc<dyn UsersInfoApi>;

fn log_failure(op: &str, e: &UsersInfoError) -> Response {
    match e {
        UsersInfoError::Validation { .. } | UsersInfoError::NotFound { .. } => {
            warn!("{} failed: {}", op, e)
        }
        _ => error!("{} failed: {}", op, e),
    }
    error_response(e)
}

/// Undecodable bodies are 400; a body over the ingress limit keeps its 413.
fn bad_body(rejection: JsonRejection) -> Response {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("decode body failed: {}", rejection.body_text());
        return rejection.into_response();
    }
    log_failure(
        "decode body",
        &UsersInfoError::validation(rejection.body_text()),
    )
}

/// GET /users: one user when `id` is given, otherwise the full list.
pub async fn get_or_list_users(
    Extension(api): Extension<UsersApi>,
    Extension(scope): Extension<RequestScope>,
    Query(query): Query<IdQuery>,
) -> Result<Response, Response> {
    let id = query.parse().map_err(|e| log_failure("get user", &e))?;
    let (ctx, _guard) = scope.begin();

    match id {
        Some(id) => {
            info!("Getting user with id: {}", id);
            let user = api
                .get_user(&ctx, id)
                .await
                .map_err(|e| log_failure("get user", &e))?;
            Ok(Json(UserDto::from(user)).into_response())
        }
        None => {
            info!("Listing users");
            let users = api
                .list_users(&ctx)
                .await
                .map_err(|e| log_failure("list users", &e))?;
            let dtos: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
            Ok(Json(dtos).into_response())
        }
    }
}

/// POST /users
pub async fn create_user(
    Extension(api): Extension<UsersApi>,
    Extension(scope): Extension<RequestScope>,
    body: Result<Json<CreateUserReq>, JsonRejection>,
) -> Result<(StatusCode, Json<UserDto>), Response> {
    let Json(req) = body.map_err(bad_body)?;
    info!("Creating user: {:?}", req);
    require_name_and_email(&req.name, &req.email).map_err(|e| log_failure("create user", &e))?;

    let (ctx, _guard) = scope.begin();
    let user = api
        .create_user(&ctx, req.name, req.email)
        .await
        .map_err(|e| log_failure("create user", &e))?;
    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

/// PUT /users
pub async fn update_user(
    Extension(api): Extension<UsersApi>,
    Extension(scope): Extension<RequestScope>,
    body: Result<Json<UpdateUserReq>, JsonRejection>,
) -> Result<Json<UserDto>, Response> {
    let Json(req) = body.map_err(bad_body)?;
    info!("Updating user {} with: {:?}", req.id, req);
    require_name_and_email(&req.name, &req.email).map_err(|e| log_failure("update user", &e))?;

    let (ctx, _guard) = scope.begin();
    let user = api
        .update_user(&ctx, req.id, req.name, req.email)
        .await
        .map_err(|e| log_failure("update user", &e))?;
    Ok(Json(UserDto::from(user)))
}

/// DELETE /users?id=N. The id is read from the query string only.
pub async fn delete_user(
    Extension(api): Extension<UsersApi>,
    Extension(scope): Extension<RequestScope>,
    Query(query): Query<IdQuery>,
) -> Result<StatusCode, Response> {
    let id = query
        .parse()
        .and_then(|id| id.ok_or_else(|| UsersInfoError::validation("missing id")))
        .map_err(|e| log_failure("delete user", &e))?;
    info!("Deleting user: {}", id);

    let (ctx, _guard) = scope.begin();
    api.delete_user(&ctx, id)
        .await
        .map_err(|e| log_failure("delete user", &e))?;
    Ok(StatusCode::NO_CONTENT)
}
