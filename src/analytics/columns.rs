// src/analytics/columns.rs

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::Weekday;

use crate::{
    analytics::parsers::{parse_currency, parse_week},
    models::table::Row,
};

/// Colunas conhecidas da planilha semanal. Qualquer outra coluna é ignorada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Week,
    GrandTotal,
    InHouse,
    FirstParty,
    DoorDash,
    Grubhub,
    UberEats,
    Catering,
}

impl Column {
    /// Colunas de valor monetário, na ordem de empilhamento dos gráficos.
    pub const AMOUNTS: [Column; 7] = [
        Column::GrandTotal,
        Column::InHouse,
        Column::FirstParty,
        Column::DoorDash,
        Column::Grubhub,
        Column::UberEats,
        Column::Catering,
    ];

    /// Canais de venda que compõem o total.
    pub const CHANNELS: [Column; 6] = [
        Column::InHouse,
        Column::FirstParty,
        Column::DoorDash,
        Column::Grubhub,
        Column::UberEats,
        Column::Catering,
    ];

    /// Plataformas de delivery (3P).
    pub const THIRD_PARTY: [Column; 3] = [Column::DoorDash, Column::Grubhub, Column::UberEats];

    pub fn header(self) -> &'static str {
        match self {
            Column::Week => "Week",
            Column::GrandTotal => "Grand Total",
            Column::InHouse => "In-House",
            Column::FirstParty => "1P",
            Column::DoorDash => "DD",
            Column::Grubhub => "GH",
            Column::UberEats => "UB",
            Column::Catering => "Catering",
        }
    }

    /// Nome do campo na saída JSON dos gráficos.
    pub fn field_name(self) -> &'static str {
        match self {
            Column::Week => "week",
            Column::GrandTotal => "grandTotal",
            Column::InHouse => "inHouse",
            Column::FirstParty => "firstParty",
            Column::DoorDash => "doorDash",
            Column::Grubhub => "grubhub",
            Column::UberEats => "uberEats",
            Column::Catering => "catering",
        }
    }

    pub fn is_amount(self) -> bool {
        self != Column::Week
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Coluna desconhecida: {0}")]
pub struct UnknownColumn(pub String);

impl FromStr for Column {
    type Err = UnknownColumn;

    // Aceita tanto o cabeçalho da planilha ("DD") quanto o nome do campo ("doorDash")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        std::iter::once(Column::Week)
            .chain(Column::AMOUNTS)
            .find(|column| column.header() == wanted || column.field_name() == wanted)
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}

/// Linha semanal já tipada: semana numérica + valores monetários conhecidos.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekRow {
    pub week: u32,
    amounts: BTreeMap<Column, f64>,
}

impl WeekRow {
    // Semana ilegível vira 0: a linha fica na série, zerada, e não some.
    pub fn from_row(row: &Row) -> Self {
        let week = parse_week(row.get(Column::Week.header())).unwrap_or(0);
        let amounts = Column::AMOUNTS
            .into_iter()
            .map(|column| (column, parse_currency(row.get(column.header()))))
            .collect();

        Self { week, amounts }
    }

    pub fn amount(&self, column: Column) -> f64 {
        self.amounts.get(&column).copied().unwrap_or(0.0)
    }

    pub fn sum(&self, columns: &[Column]) -> f64 {
        columns.iter().map(|column| self.amount(*column)).sum()
    }

    pub fn label(&self) -> String {
        format!("Week {}", self.week)
    }
}

/// Converte as linhas e ordena por semana (ordenação estável: empates
/// mantêm a ordem da planilha).
pub fn week_rows(table: &[Row]) -> Vec<WeekRow> {
    let mut rows: Vec<WeekRow> = table.iter().map(WeekRow::from_row).collect();
    rows.sort_by_key(|row| row.week);
    rows
}

/// Colunas de dia da semana presentes na linha ("Monday", "Mon", ...).
pub fn weekday_cells(row: &Row) -> impl Iterator<Item = (Weekday, f64)> + '_ {
    row.cells().filter_map(|(header, value)| {
        header
            .parse::<Weekday>()
            .ok()
            .map(|day| (day, parse_currency(Some(value))))
    })
}
