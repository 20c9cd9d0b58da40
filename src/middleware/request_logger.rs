// src/middleware/request_logger.rs

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};

/// Registra método, caminho, status e duração de cada requisição.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::error!(%method, %path, status = status.as_u16(), elapsed_ms, "requisição falhou");
    } else if status.is_client_error() {
        tracing::warn!(%method, %path, status = status.as_u16(), elapsed_ms, "requisição rejeitada");
    } else {
        tracing::info!(%method, %path, status = status.as_u16(), elapsed_ms, "requisição atendida");
    }

    response
}
