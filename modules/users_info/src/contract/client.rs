use async_trait::async_trait;
use db::RequestCtx;

use crate::contract::{error::UsersInfoError, model::User};

/// Public API trait for the users_info module.
///
/// Every call takes the caller's [`RequestCtx`]; cancelling it or letting its
/// deadline pass aborts the store query behind the call.
#[async_trait]
pub trait UsersInfoApi: Send + Sync {
    /// Create a user; timestamps are assigned by the service.
    async fn create_user(
        &self,
        ctx: &RequestCtx,
        name: String,
        email: String,
    ) -> Result<User, UsersInfoError>;

    /// Get a user by ID
    async fn get_user(&self, ctx: &RequestCtx, id: i64) -> Result<User, UsersInfoError>;

    /// Replace name and email; refreshes `updated_at`.
    async fn update_user(
        &self,
        ctx: &RequestCtx,
        id: i64,
        name: String,
        email: String,
    ) -> Result<User, UsersInfoError>;

    /// Delete a user by ID
    async fn delete_user(&self, ctx: &RequestCtx, id: i64) -> Result<(), UsersInfoError>;

    /// All users, ordered by id.
    async fn list_users(&self, ctx: &RequestCtx) -> Result<Vec<User>, UsersInfoError>;
}
