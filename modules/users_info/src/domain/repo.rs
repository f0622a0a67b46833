use async_trait::async_trait;
use db::RequestCtx;

use crate::contract::model::{NewUser, User, UserUpdate};
use crate::domain::error::DomainError;

/// Port for the domain layer: persistence operations the domain needs.
///
/// Implementations classify store failures before returning: a missing row is
/// `UserNotFound`, an aborted query is `Canceled`, everything else is `Store`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Insert a user and return it with the store-assigned id.
    async fn create(&self, ctx: &RequestCtx, new_user: NewUser) -> Result<User, DomainError>;
    /// Load exactly one user.
    async fn get_by_id(&self, ctx: &RequestCtx, id: i64) -> Result<User, DomainError>;
    /// Overwrite name/email/updated_at; returns the row as stored.
    async fn update(&self, ctx: &RequestCtx, update: UserUpdate) -> Result<User, DomainError>;
    /// Hard delete by id.
    async fn delete(&self, ctx: &RequestCtx, id: i64) -> Result<(), DomainError>;
    /// Every user; empty table yields an empty vec.
    async fn list(&self, ctx: &RequestCtx) -> Result<Vec<User>, DomainError>;
}
