use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use db::{DbHandle, RequestCtx};
use tracing::info;

use crate::api::rest::{routes, RequestScope};
use crate::contract::client::UsersInfoApi;
use crate::domain::service::Service;
use crate::gateways::local::UsersInfoLocalClient;
use crate::infra::storage::{ensure_users_table, SqlUsersRepository};

/// Wiring for the users slice: SQL repository → service → local client → REST routes.
#[derive(Clone)]
pub struct UsersInfo {
    client: Arc<dyn UsersInfoApi>,
}

impl UsersInfo {
    /// Bootstrap the `users` table and build the service stack over `db`.
    pub async fn init(db: Arc<DbHandle>, ctx: &RequestCtx) -> anyhow::Result<Self> {
        info!("Initializing users_info module");

        ensure_users_table(&db, ctx)
            .await
            .context("failed to bootstrap users table")?;

        let repo = SqlUsersRepository::new(db);
        let service = Arc::new(Service::new(Arc::new(repo)));
        let client: Arc<dyn UsersInfoApi> = Arc::new(UsersInfoLocalClient::new(service));

        info!("users_info module initialized");
        Ok(Self { client })
    }

    /// Build around an existing client, e.g. a test double.
    pub fn with_client(client: Arc<dyn UsersInfoApi>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> Arc<dyn UsersInfoApi> {
        self.client.clone()
    }

    pub fn register_rest(&self, router: Router, scope: RequestScope) -> Router {
        info!("Registering users_info REST routes");
        routes::register_routes(router, self.client(), scope)
    }
}
