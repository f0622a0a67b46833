use anyhow::{anyhow, Context, Result};
use axum::Router;
use clap::{Parser, Subcommand};
use db::{redact_dsn, ConnectOpts, DbEngine, DbHandle, RequestCtx};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use users_info::api::rest::RequestScope;
use users_info::UsersInfo;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Users Server - CRUD HTTP service over a single users table
#[derive(Parser)]
#[command(name = "users-server")]
#[command(about = "Users Server - CRUD HTTP service over a single users table")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("users-server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

/// Final DSN and engine for the configured database; fails on a driver/scheme mismatch.
fn resolve_database(cfg: &DatabaseConfig, base_dir: &Path) -> Result<(String, DbEngine)> {
    let dsn = cfg.resolved_url(base_dir)?;
    let engine = DbHandle::detect_with_driver(cfg.driver.as_deref(), &dsn)
        .with_context(|| format!("invalid database configuration for {}", redact_dsn(&dsn)))?;
    Ok((dsn, engine))
}

async fn connect_database(cfg: &DatabaseConfig, base_dir: &Path) -> Result<Arc<DbHandle>> {
    let (dsn, engine) = resolve_database(cfg, base_dir)?;

    let connect_opts = ConnectOpts {
        max_conns: cfg.max_conns,
        acquire_timeout: Some(Duration::from_secs(5)),
        sqlite_busy_timeout: cfg
            .busy_timeout_ms
            .map(|ms| Duration::from_millis(u64::from(ms))),
        create_sqlite_dirs: true,
        ..Default::default()
    };

    tracing::info!("Connecting to database: {}", redact_dsn(&dsn));
    let db = DbHandle::connect(&dsn, connect_opts)
        .await
        .with_context(|| format!("failed to connect to {}", redact_dsn(&dsn)))?;
    tracing::info!("Connected DB backend: {:?}", engine);
    Ok(Arc::new(db))
}

async fn run_server(config: AppConfig) -> Result<()> {
    let db_config = config
        .database
        .as_ref()
        .ok_or_else(|| anyhow!("database configuration is required"))?;
    let base_dir = PathBuf::from(&config.server.home_dir);
    let db = connect_database(db_config, &base_dir).await?;

    // `shutdown` stops the listener; `requests` parents every request context
    // and is cancelled once in-flight requests have drained.
    let shutdown = CancellationToken::new();
    let requests = CancellationToken::new();

    let users = UsersInfo::init(db.clone(), &RequestCtx::new(requests.child_token())).await?;
    let scope = RequestScope::new(
        requests.clone(),
        Duration::from_secs(config.server.timeout_sec),
    );
    let router = api_ingress::build_router(users.register_rest(Router::new(), scope));

    let signals = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = runtime::wait_for_shutdown().await {
                tracing::error!("signal handler failed: {:#}", e);
            }
            shutdown.cancel();
        })
    };

    let served = api_ingress::serve(&config.server.bind_addr(), router, shutdown.clone()).await;

    signals.abort();
    requests.cancel();
    db.close().await;
    tracing::info!("users-server stopped");
    served
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    if let Some(db) = &config.database {
        let (dsn, engine) = resolve_database(db, Path::new(&config.server.home_dir))?;
        tracing::info!("Database {:?} at {}", engine, redact_dsn(&dsn));
    }
    if config.server.host.trim().is_empty() {
        return Err(anyhow!("server.host is empty"));
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
