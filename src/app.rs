/*
 * Responsibility
 * - Config読み込み → 依存生成 (PgPool / repo / AuthService) → Router 組み立て
 * - Middleware の適用 (HTTP / CORS / security headers)
 * - axum::serve() で起動、SIGINT/SIGTERM で graceful shutdown
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware,
    repos::{PgCompanyRepo, PgUserRepo},
    services::auth::build_auth_service,
    state::AppState,
};

fn init_tracing() {
    // RUST_LOG があればそれを優先
    // ex: RUST_LOG=info,company_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,company_api=debug,tower_http=info")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr が見えない起動方法でも panic を取りこぼさない
        tracing::error!(?info, "panic");

        // 開発中は即落として気付けるようにする。本番は default hook に任せて動き続ける
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting company-api in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let pool = connect(&config).await?;
    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to apply migrations")?;
        tracing::info!("migrations applied");
    }

    let state = build_state(&config, pool)?;
    let app = build_app(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn connect(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
        .context("failed to connect to the database")?;

    Ok(pool)
}

fn build_state(config: &Config, pool: PgPool) -> Result<AppState> {
    let auth = build_auth_service(config).context("failed to build token verifier")?;

    Ok(AppState::new(
        Arc::new(PgCompanyRepo::new(pool.clone())),
        Arc::new(PgUserRepo::new(pool)),
        auth,
    ))
}

/// Routes only, no cross-cutting layers. Tests drive this directly.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::v1::handlers::health::health))
        .nest("/api/v1", api::v1::routes())
        .with_state(state)
}

pub fn build_app(state: AppState, config: &Config) -> Router {
    let router = build_router(state);
    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
