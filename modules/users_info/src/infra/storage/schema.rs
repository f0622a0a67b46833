use db::{DbEngine, DbHandle, RequestCtx, Statement};
use tracing::info;

const PG_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)";

const SQLITE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

/// Create the `users` table if it does not exist. Idempotent; no migration history.
pub async fn ensure_users_table(db: &DbHandle, ctx: &RequestCtx) -> db::Result<()> {
    let ddl = match db.engine() {
        DbEngine::Postgres => PG_USERS_TABLE,
        DbEngine::Sqlite => SQLITE_USERS_TABLE,
    };
    db.execute(ctx, Statement::new(ddl)).await?;
    info!(engine = ?db.engine(), "users table ready");
    Ok(())
}
