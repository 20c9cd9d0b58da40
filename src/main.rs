//src/main.rs

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod analytics;
mod common;
mod config;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Settings};
use crate::middleware::request_logger::request_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Carrega o .env antes do logger para que RUST_LOG também possa vir de lá
    let settings = Settings::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let addr = settings.bind_addr;
    let app = app(AppState::new(settings));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {addr}"))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;
    Ok(())
}

fn app(app_state: AppState) -> Router {
    // Um gráfico por vez (e a série padrão de cada um, para depuração)
    let chart_routes = Router::new()
        .route("/{chart}", post(handlers::dashboard::get_chart))
        .route("/{chart}/default", get(handlers::dashboard::get_default_chart));

    let debug_routes = Router::new().route("/parse", post(handlers::debug::parse_cells));

    let body_limit = app_state.settings.max_body_bytes;

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/dashboard", post(handlers::dashboard::get_dashboard))
        .nest("/api/charts", chart_routes)
        .nest("/api/debug", debug_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(request_logger))
        .with_state(app_state)
}
