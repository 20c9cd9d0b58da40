// src/analytics/mappers.rs

//! Conversões linha -> série, uma por gráfico.
//!
//! Todas são puras: tabela vazia gera série vazia (o fallback é decidido no
//! serviço) e linhas ruins continuam na série com valores zerados.

use std::collections::BTreeMap;

use chrono::Weekday;

use crate::{
    analytics::{
        columns::{week_rows, weekday_cells, Column},
        parsers::{format_currency, format_percentage, hour_label, parse_currency, parse_hour, round2},
    },
    models::{
        charts::{CategoryPoint, DayPoint, HourPoint, RatioPoint, ShareBreakdown, SlicePoint, WeeklyPoint},
        table::Row,
    },
};

const WEEK_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// `part / whole × 100` arredondado; 0 quando o todo não é positivo.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        round2(part / whole * 100.0)
    } else {
        0.0
    }
}

/// Total semanal ("Grand Total"), ordenado por semana.
pub fn weekly_series(table: &[Row]) -> Vec<WeeklyPoint> {
    week_rows(table)
        .into_iter()
        .map(|row| WeeklyPoint {
            week: row.label(),
            value: row.amount(Column::GrandTotal),
        })
        .collect()
}

/// Valores de cada canal por semana (barras empilhadas).
pub fn category_breakdown(table: &[Row]) -> Vec<CategoryPoint> {
    week_rows(table)
        .into_iter()
        .map(|row| CategoryPoint {
            week: row.label(),
            in_house: row.amount(Column::InHouse),
            first_party: row.amount(Column::FirstParty),
            door_dash: row.amount(Column::DoorDash),
            grubhub: row.amount(Column::Grubhub),
            uber_eats: row.amount(Column::UberEats),
            catering: row.amount(Column::Catering),
        })
        .collect()
}

/// Razão 1P / 3P em percentual, onde 3P é a soma das colunas de delivery.
pub fn first_party_ratio(table: &[Row], third_party_columns: &[Column]) -> Vec<RatioPoint> {
    week_rows(table)
        .into_iter()
        .map(|row| {
            let first_party = row.amount(Column::FirstParty);
            let third_party = row.sum(third_party_columns);
            let ratio = percent_of(first_party, third_party);

            RatioPoint {
                week: row.label(),
                first_party,
                third_party,
                ratio,
                label: format_percentage(ratio),
            }
        })
        .collect()
}

/// Participação de cada coluna no total da semana (total = soma das colunas).
pub fn percent_of_total(table: &[Row], total_columns: &[Column]) -> Vec<ShareBreakdown> {
    week_rows(table)
        .into_iter()
        .map(|row| {
            let total = row.sum(total_columns);
            let shares = total_columns
                .iter()
                .map(|column| {
                    (
                        column.field_name().to_string(),
                        percent_of(row.amount(*column), total),
                    )
                })
                .collect();

            ShareBreakdown {
                week: row.label(),
                total,
                shares,
            }
        })
        .collect()
}

/// Pizza: soma de cada canal na tabela inteira e sua fatia do total.
pub fn channel_mix(table: &[Row], channels: &[Column]) -> Vec<SlicePoint> {
    let rows = week_rows(table);
    let sums: Vec<(Column, f64)> = channels
        .iter()
        .map(|column| (*column, rows.iter().map(|row| row.amount(*column)).sum()))
        .collect();
    let grand: f64 = sums.iter().map(|(_, value)| value).sum();

    sums.into_iter()
        .map(|(column, value)| {
            let percentage = percent_of(value, grand);
            SlicePoint {
                name: column.header().to_string(),
                value: round2(value),
                percentage,
                label: format!("{} ({})", format_currency(value), format_percentage(percentage)),
            }
        })
        .collect()
}

/// Média de cada dia da semana sobre as semanas que trazem aquela coluna.
///
/// Devolve os 7 dias (segunda a domingo); dia sem nenhuma coluna fica 0.
/// Tabela sem nenhuma coluna de dia da semana não gera pontos.
pub fn day_of_week_averages(table: &[Row]) -> Vec<DayPoint> {
    let mut totals: BTreeMap<u32, (f64, u32)> = BTreeMap::new();
    for row in table {
        for (day, value) in weekday_cells(row) {
            let entry = totals.entry(day.num_days_from_monday()).or_default();
            entry.0 += value;
            entry.1 += 1;
        }
    }
    if totals.is_empty() {
        return Vec::new();
    }

    WEEK_DAYS
        .into_iter()
        .map(|day| {
            let value = match totals.get(&day.num_days_from_monday()) {
                Some((sum, count)) if *count > 0 => round2(sum / f64::from(*count)),
                _ => 0.0,
            };
            DayPoint {
                day: weekday_name(day).to_string(),
                value,
            }
        })
        .collect()
}

/// Média do "Grand Total" por hora do dia, em ordem de hora.
///
/// Linhas sem hora reconhecível não entram (série agregada).
pub fn hourly_averages(table: &[Row]) -> Vec<HourPoint> {
    let mut totals: BTreeMap<u32, (f64, u32)> = BTreeMap::new();
    for row in table {
        let Some(hour) = parse_hour(row.get("Hour")) else {
            tracing::debug!("Linha horária sem hora reconhecível; ignorada na agregação.");
            continue;
        };
        let entry = totals.entry(hour).or_default();
        entry.0 += parse_currency(row.get(Column::GrandTotal.header()));
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|(hour, (sum, count))| HourPoint {
            hour: hour_label(hour),
            value: round2(sum / f64::from(count)),
        })
        .collect()
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
