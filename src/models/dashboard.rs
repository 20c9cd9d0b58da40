// src/models/dashboard.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    charts::ChartSeries,
    table::{CellValue, Workbook},
};

// 1. Opções dos gráficos (todas opcionais; o padrão vem da configuração)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[validate(range(min = 1, max = 52, message = "A janela da tendência deve estar entre 1 e 52."))]
    pub window_size: Option<usize>,

    #[validate(length(min = 1, message = "Informe ao menos uma coluna de 3P."))]
    pub third_party_columns: Option<Vec<String>>,

    #[validate(length(min = 1, message = "Informe ao menos uma coluna de total."))]
    pub total_columns: Option<Vec<String>>,

    pub illustrative_fallback: Option<bool>,
}

// 2. Corpo das requisições de gráfico: snapshot das tabelas + opções
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRequest {
    #[serde(default)]
    pub tables: Workbook,

    #[serde(default)]
    #[validate(nested)]
    pub options: ChartOptions,
}

// 3. Todos os gráficos de uma vez
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// `true` se ao menos um gráfico veio de dados enviados.
    pub has_data: bool,
    pub charts: Vec<ChartSeries>,
}

// 4. Tela de depuração dos parsers
#[derive(Debug, Deserialize, Validate)]
pub struct ParseCellsRequest {
    #[validate(length(min = 1, max = 1000, message = "Envie entre 1 e 1000 valores."))]
    pub values: Vec<CellValue>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseCellsResponse {
    pub currency: Vec<f64>,
    pub percentage: Vec<f64>,
}
