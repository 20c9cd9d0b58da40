// src/handlers/dashboard.rs

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::{charts::ChartKind, dashboard::DashboardRequest},
};

// Corpo JSON + validação, com erros já traduzidos
fn accept_request(
    payload: Result<Json<DashboardRequest>, JsonRejection>,
    locale: &Locale,
) -> Result<DashboardRequest, ApiError> {
    let Json(request) = payload.map_err(|e| AppError::from(e).to_api_error(locale))?;
    request
        .validate()
        .map_err(|e| AppError::from(e).to_api_error(locale))?;
    Ok(request)
}

fn parse_chart(chart: &str, locale: &Locale) -> Result<ChartKind, ApiError> {
    chart
        .parse::<ChartKind>()
        .map_err(|unknown| AppError::UnknownChart(unknown).to_api_error(locale))
}

// POST /api/dashboard
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    locale: Locale,
    payload: Result<Json<DashboardRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let request = accept_request(payload, &locale)?;

    let dashboard = app_state
        .dashboard_service
        .get_dashboard(&request)
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(dashboard)))
}

// POST /api/charts/{chart}
pub async fn get_chart(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(chart): Path<String>,
    payload: Result<Json<DashboardRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = parse_chart(&chart, &locale)?;
    let request = accept_request(payload, &locale)?;

    let series = app_state
        .dashboard_service
        .get_chart(kind, &request)
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(series)))
}

// GET /api/charts/{chart}/default
pub async fn get_default_chart(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(chart): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = parse_chart(&chart, &locale)?;

    Ok((StatusCode::OK, Json(app_state.dashboard_service.get_default_chart(kind))))
}
