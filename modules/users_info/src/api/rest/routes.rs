use axum::{routing::get, Extension, Router};
use tracing::info;

use crate::api::rest::handlers::{self, UsersApi};
use crate::api::rest::scope::RequestScope;

/// Route table for `/users`. Methods without a handler get 405 from the method router.
pub fn register_routes(router: Router, api: UsersApi, scope: RequestScope) -> Router {
    let users = get(handlers::get_or_list_users)
        .post(handlers::create_user)
        .put(handlers::update_user)
        .delete(handlers::delete_user);

    let users_router = Router::new()
        .route("/users", users)
        .layer(Extension(api))
        .layer(Extension(scope));

    info!("Registered /users routes");
    router.merge(users_router)
}
