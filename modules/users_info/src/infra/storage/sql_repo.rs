//! Relational implementation of the domain repository port.
//!
//! Queries are fixed templates with `$N` placeholders so the same text runs on
//! PostgreSQL and SQLite. Update and delete rely on the store to report a
//! missing row: `UPDATE .. RETURNING` yields no row and `DELETE` reports zero
//! affected rows, both surfacing as `UserNotFound`.

use std::sync::Arc;

use async_trait::async_trait;
use db::{DbError, DbHandle, RequestCtx, Statement};
use tracing::warn;

use crate::contract::model::{NewUser, User, UserUpdate};
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;
use crate::infra::storage::entity::UserRow;

const INSERT_USER: &str = "INSERT INTO users (name, email, created_at, updated_at) \
     VALUES ($1, $2, $3, $4) \
     RETURNING id, name, email, created_at, updated_at";

const SELECT_USER: &str =
    "SELECT id, name, email, created_at, updated_at FROM users WHERE id = $1";

const UPDATE_USER: &str = "UPDATE users SET name = $1, email = $2, updated_at = $3 \
     WHERE id = $4 \
     RETURNING id, name, email, created_at, updated_at";

const DELETE_USER: &str = "DELETE FROM users WHERE id = $1";

const LIST_USERS: &str =
    "SELECT id, name, email, created_at, updated_at FROM users ORDER BY id";

/// Repository over a shared [`DbHandle`]. Stateless apart from the pool.
#[derive(Clone)]
pub struct SqlUsersRepository {
    db: Arc<DbHandle>,
}

impl SqlUsersRepository {
    pub fn new(db: Arc<DbHandle>) -> Self {
        Self { db }
    }
}

/// Map a store error onto the domain taxonomy.
/// `id` is the row the operation targeted, if any; only then is a missing row `UserNotFound`.
fn classify(err: DbError, id: Option<i64>) -> DomainError {
    match id {
        Some(id) if err.is_row_not_found() => DomainError::user_not_found(id),
        _ if err.is_canceled() => {
            warn!("users query aborted: {}", err);
            DomainError::canceled(err.to_string())
        }
        _ => DomainError::store(err.to_string()),
    }
}

#[async_trait]
impl UsersRepository for SqlUsersRepository {
    async fn create(&self, ctx: &RequestCtx, new_user: NewUser) -> Result<User, DomainError> {
        let row: UserRow = self
            .db
            .fetch_one(
                ctx,
                Statement::new(INSERT_USER)
                    .bind(new_user.name)
                    .bind(new_user.email)
                    .bind(new_user.created_at)
                    .bind(new_user.updated_at),
            )
            .await
            .map_err(|e| classify(e, None))?;
        Ok(row.into())
    }

    async fn get_by_id(&self, ctx: &RequestCtx, id: i64) -> Result<User, DomainError> {
        let row: UserRow = self
            .db
            .fetch_one(ctx, Statement::new(SELECT_USER).bind(id))
            .await
            .map_err(|e| classify(e, Some(id)))?;
        Ok(row.into())
    }

    async fn update(&self, ctx: &RequestCtx, update: UserUpdate) -> Result<User, DomainError> {
        let id = update.id;
        let row: UserRow = self
            .db
            .fetch_one(
                ctx,
                Statement::new(UPDATE_USER)
                    .bind(update.name)
                    .bind(update.email)
                    .bind(update.updated_at)
                    .bind(id),
            )
            .await
            .map_err(|e| classify(e, Some(id)))?;
        Ok(row.into())
    }

    async fn delete(&self, ctx: &RequestCtx, id: i64) -> Result<(), DomainError> {
        let affected = self
            .db
            .execute(ctx, Statement::new(DELETE_USER).bind(id))
            .await
            .map_err(|e| classify(e, Some(id)))?;
        if affected == 0 {
            return Err(DomainError::user_not_found(id));
        }
        Ok(())
    }

    async fn list(&self, ctx: &RequestCtx) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = self
            .db
            .fetch_all(ctx, Statement::new(LIST_USERS))
            .await
            .map_err(|e| classify(e, None))?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}
