use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Postgres, Sqlite};

use crate::statement::{Arg, Statement};
use crate::{DbHandle, DbPool, RequestCtx, Result};

/// Row types decodable from every supported engine.
pub trait FromDbRow:
    for<'r> FromRow<'r, PgRow> + for<'r> FromRow<'r, SqliteRow> + Send + Unpin
{
}

impl<T> FromDbRow for T where
    T: for<'r> FromRow<'r, PgRow> + for<'r> FromRow<'r, SqliteRow> + Send + Unpin
{
}

macro_rules! bind_args {
    ($query:expr, $args:expr) => {{
        let mut q = $query;
        for arg in $args {
            q = match arg {
                Arg::Int(v) => q.bind(v),
                Arg::Text(v) => q.bind(v),
                Arg::Timestamp(v) => q.bind(v),
            };
        }
        q
    }};
}

impl DbHandle {
    /// Fetch exactly one row. Zero rows yields `sqlx::Error::RowNotFound`.
    pub async fn fetch_one<T: FromDbRow>(&self, ctx: &RequestCtx, stmt: Statement<'_>) -> Result<T> {
        let (sql, args) = stmt.into_parts();
        tracing::trace!(sql, args = args.len(), "fetch_one");
        match self.pool() {
            DbPool::Postgres(pool) => {
                ctx.run(bind_args!(sqlx::query_as::<Postgres, T>(sql), args).fetch_one(pool))
                    .await
            }
            DbPool::Sqlite(pool) => {
                ctx.run(bind_args!(sqlx::query_as::<Sqlite, T>(sql), args).fetch_one(pool))
                    .await
            }
        }
    }

    /// Fetch at most one row.
    pub async fn fetch_optional<T: FromDbRow>(
        &self,
        ctx: &RequestCtx,
        stmt: Statement<'_>,
    ) -> Result<Option<T>> {
        let (sql, args) = stmt.into_parts();
        tracing::trace!(sql, args = args.len(), "fetch_optional");
        match self.pool() {
            DbPool::Postgres(pool) => {
                ctx.run(bind_args!(sqlx::query_as::<Postgres, T>(sql), args).fetch_optional(pool))
                    .await
            }
            DbPool::Sqlite(pool) => {
                ctx.run(bind_args!(sqlx::query_as::<Sqlite, T>(sql), args).fetch_optional(pool))
                    .await
            }
        }
    }

    /// Fetch every matching row; an empty result is `Ok(vec![])`.
    pub async fn fetch_all<T: FromDbRow>(
        &self,
        ctx: &RequestCtx,
        stmt: Statement<'_>,
    ) -> Result<Vec<T>> {
        let (sql, args) = stmt.into_parts();
        tracing::trace!(sql, args = args.len(), "fetch_all");
        match self.pool() {
            DbPool::Postgres(pool) => {
                ctx.run(bind_args!(sqlx::query_as::<Postgres, T>(sql), args).fetch_all(pool))
                    .await
            }
            DbPool::Sqlite(pool) => {
                ctx.run(bind_args!(sqlx::query_as::<Sqlite, T>(sql), args).fetch_all(pool))
                    .await
            }
        }
    }

    /// Execute a statement and return the number of affected rows.
    pub async fn execute(&self, ctx: &RequestCtx, stmt: Statement<'_>) -> Result<u64> {
        let (sql, args) = stmt.into_parts();
        tracing::trace!(sql, args = args.len(), "execute");
        match self.pool() {
            DbPool::Postgres(pool) => ctx
                .run(bind_args!(sqlx::query::<Postgres>(sql), args).execute(pool))
                .await
                .map(|r| r.rows_affected()),
            DbPool::Sqlite(pool) => ctx
                .run(bind_args!(sqlx::query::<Sqlite>(sql), args).execute(pool))
                .await
                .map(|r| r.rows_affected()),
        }
    }
}
