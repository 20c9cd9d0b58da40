// src/analytics/render.rs

use crate::{
    analytics::{
        columns::Column,
        mappers,
        smoothing::{smooth, DEFAULT_WINDOW},
    },
    models::{charts::{ChartKind, ChartPoints}, table::Row},
};

/// Parâmetros das transformações (já validados).
#[derive(Debug, Clone, PartialEq)]
pub struct ChartParams {
    pub window: usize,
    pub third_party_columns: Vec<Column>,
    pub total_columns: Vec<Column>,
}

impl Default for ChartParams {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            third_party_columns: Column::THIRD_PARTY.to_vec(),
            total_columns: Column::CHANNELS.to_vec(),
        }
    }
}

/// Roda o mapper do gráfico pedido sobre a tabela.
pub fn render(kind: ChartKind, table: &[Row], params: &ChartParams) -> ChartPoints {
    match kind {
        ChartKind::WeeklySales => {
            ChartPoints::WeeklySales(smooth(&mappers::weekly_series(table), params.window))
        }
        ChartKind::ChannelBreakdown => {
            ChartPoints::ChannelBreakdown(mappers::category_breakdown(table))
        }
        ChartKind::FirstPartyRatio => ChartPoints::FirstPartyRatio(mappers::first_party_ratio(
            table,
            &params.third_party_columns,
        )),
        ChartKind::ShareOfTotal => ChartPoints::ShareOfTotal(mappers::percent_of_total(
            table,
            &params.total_columns,
        )),
        ChartKind::ChannelMix => {
            ChartPoints::ChannelMix(mappers::channel_mix(table, &params.total_columns))
        }
        ChartKind::DayOfWeek => ChartPoints::DayOfWeek(mappers::day_of_week_averages(table)),
        ChartKind::Hourly => ChartPoints::Hourly(mappers::hourly_averages(table)),
    }
}
