use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::{
    analytics::columns::UnknownColumn,
    middleware::i18n::Locale,
    models::charts::ChartKind,
};

// Erros da requisição: estes sim chegam ao cliente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Corpo da requisição inválido: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    #[error("Gráfico desconhecido: {0}")]
    UnknownChart(String),

    #[error(transparent)]
    UnknownColumn(#[from] UnknownColumn),

    #[error("Coluna sem valores monetários: {0}")]
    InvalidColumn(String),
}

// Falhas dentro da transformação: nunca viram erro para o cliente, o serviço
// troca a série pelo padrão e registra no log.
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("Sub-tabela {0} ausente")]
    MissingTable(&'static str),

    #[error("Sub-tabela {0} vazia")]
    EmptyTable(&'static str),

    #[error("Nenhuma linha aproveitável para o gráfico {0}")]
    NoUsableRows(ChartKind),

    #[error("Valor não finito no campo {field} do gráfico {chart}")]
    NonFinite { chart: ChartKind, field: &'static str },
}

// O erro já traduzido, pronto para virar resposta HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn to_api_error(&self, locale: &Locale) -> ApiError {
        let pt = locale.is_portuguese();
        let simple = |status: StatusCode, en: String, pt_msg: String| ApiError {
            status,
            message: if pt { pt_msg } else { en },
            details: None,
        };

        match self {
            AppError::InvalidBody(rejection) => simple(
                rejection.status(),
                "The request body is not valid JSON for this endpoint.".to_string(),
                "O corpo da requisição não é um JSON válido para este endpoint.".to_string(),
            ),
            AppError::ValidationError(errors) => {
                let mut details = BTreeMap::new();
                collect_messages("", errors, &mut details);
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: if pt {
                        "Um ou mais campos são inválidos.".to_string()
                    } else {
                        "One or more fields are invalid.".to_string()
                    },
                    details: Some(json!(details)),
                }
            }
            AppError::UnknownChart(chart) => simple(
                StatusCode::NOT_FOUND,
                format!("Unknown chart: {chart}."),
                format!("Gráfico desconhecido: {chart}."),
            ),
            AppError::UnknownColumn(UnknownColumn(column)) => simple(
                StatusCode::BAD_REQUEST,
                format!("Unknown column: {column}."),
                format!("Coluna desconhecida: {column}."),
            ),
            AppError::InvalidColumn(column) => simple(
                StatusCode::BAD_REQUEST,
                format!("Column {column} does not hold sales amounts."),
                format!("A coluna {column} não contém valores de venda."),
            ),
        }
    }
}

// Achata erros aninhados ("options.windowSize") num mapa campo -> mensagens.
fn collect_messages(prefix: &str, errors: &ValidationErrors, out: &mut BTreeMap<String, Vec<String>>) {
    for (field, kind) in errors.errors() {
        let path = format!("{prefix}{field}");
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                out.insert(path, messages);
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_messages(&format!("{path}."), nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(&format!("{path}[{index}]."), nested, out);
                }
            }
        }
    }
}
