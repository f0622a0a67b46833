use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use db::RequestCtx;
use tracing::{debug, info, instrument};

use crate::contract::model::{NewUser, User, UserUpdate};
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;

/// Domain service for user management.
/// The only place that decides what "now" is; depends on the repository port only.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn UsersRepository>) -> Self {
        Self { repo }
    }

    // Stored timestamps keep microseconds (PostgreSQL precision).
    fn now() -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }

    #[instrument(
        name = "users_info.service.create_user",
        skip(self, ctx),
        fields(email = %email)
    )]
    pub async fn create_user(
        &self,
        ctx: &RequestCtx,
        name: String,
        email: String,
    ) -> Result<User, DomainError> {
        info!("Creating new user");

        let now = Self::now();
        let user = self
            .repo
            .create(
                ctx,
                NewUser {
                    name,
                    email,
                    created_at: now,
                    updated_at: now,
                },
            )
            .await?;

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    #[instrument(name = "users_info.service.get_user", skip(self, ctx), fields(user_id = id))]
    pub async fn get_user(&self, ctx: &RequestCtx, id: i64) -> Result<User, DomainError> {
        debug!("Getting user by id");
        let user = self.repo.get_by_id(ctx, id).await?;
        debug!("Successfully retrieved user");
        Ok(user)
    }

    #[instrument(
        name = "users_info.service.update_user",
        skip(self, ctx),
        fields(user_id = id, email = %email)
    )]
    pub async fn update_user(
        &self,
        ctx: &RequestCtx,
        id: i64,
        name: String,
        email: String,
    ) -> Result<User, DomainError> {
        info!("Updating user");

        let user = self
            .repo
            .update(
                ctx,
                UserUpdate {
                    id,
                    name,
                    email,
                    updated_at: Self::now(),
                },
            )
            .await?;

        info!("Successfully updated user");
        Ok(user)
    }

    #[instrument(name = "users_info.service.delete_user", skip(self, ctx), fields(user_id = id))]
    pub async fn delete_user(&self, ctx: &RequestCtx, id: i64) -> Result<(), DomainError> {
        info!("Deleting user");
        self.repo.delete(ctx, id).await?;
        info!("Successfully deleted user");
        Ok(())
    }

    #[instrument(name = "users_info.service.list_users", skip(self, ctx))]
    pub async fn list_users(&self, ctx: &RequestCtx) -> Result<Vec<User>, DomainError> {
        debug!("Listing users");
        let users = self.repo.list(ctx).await?;
        debug!("Successfully listed {} users", users.len());
        Ok(users)
    }
}
