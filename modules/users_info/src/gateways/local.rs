use std::sync::Arc;

use async_trait::async_trait;
use db::RequestCtx;

use crate::contract::{client::UsersInfoApi, error::UsersInfoError, model::User};
use crate::domain::service::Service;

/// In-process client over the domain service.
pub struct UsersInfoLocalClient {
    service: Arc<Service>,
}

impl UsersInfoLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UsersInfoApi for UsersInfoLocalClient {
    async fn create_user(
        &self,
        ctx: &RequestCtx,
        name: String,
        email: String,
    ) -> Result<User, UsersInfoError> {
        self.service
            .create_user(ctx, name, email)
            .await
            .map_err(Into::into)
    }

    async fn get_user(&self, ctx: &RequestCtx, id: i64) -> Result<User, UsersInfoError> {
        self.service.get_user(ctx, id).await.map_err(Into::into)
    }

    async fn update_user(
        &self,
        ctx: &RequestCtx,
        id: i64,
        name: String,
        email: String,
    ) -> Result<User, UsersInfoError> {
        self.service
            .update_user(ctx, id, name, email)
            .await
            .map_err(Into::into)
    }

    async fn delete_user(&self, ctx: &RequestCtx, id: i64) -> Result<(), UsersInfoError> {
        self.service.delete_user(ctx, id).await.map_err(Into::into)
    }

    async fn list_users(&self, ctx: &RequestCtx) -> Result<Vec<User>, UsersInfoError> {
        self.service.list_users(ctx).await.map_err(Into::into)
    }
}
