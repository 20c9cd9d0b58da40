// src/handlers/debug.rs

use axum::{extract::rejection::JsonRejection, Json};
use validator::Validate;

use crate::{
    analytics::parsers::{parse_currency, parse_percentage},
    common::error::{ApiError, AppError},
    middleware::i18n::Locale,
    models::dashboard::{ParseCellsRequest, ParseCellsResponse},
};

// POST /api/debug/parse
// Mostra como cada célula seria lida como moeda e como percentual.
pub async fn parse_cells(
    locale: Locale,
    payload: Result<Json<ParseCellsRequest>, JsonRejection>,
) -> Result<Json<ParseCellsResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| AppError::from(e).to_api_error(&locale))?;
    request
        .validate()
        .map_err(|e| AppError::from(e).to_api_error(&locale))?;

    Ok(Json(ParseCellsResponse {
        currency: request.values.iter().map(|v| parse_currency(Some(v))).collect(),
        percentage: request.values.iter().map(|v| parse_percentage(Some(v))).collect(),
    }))
}
