// src/analytics/fallback.rs

//! Dados ilustrativos para quando não há tabela (ou ela falhou).
//!
//! Um único conjunto de constantes alimenta todos os gráficos: a série padrão
//! de cada gráfico é o próprio mapper rodando sobre estas linhas, então os
//! formatos nunca divergem.

use crate::{
    analytics::{
        columns::Column,
        parsers::hour_label,
        render::{render, ChartParams},
    },
    models::{
        charts::{ChartKind, ChartPoints},
        table::{CellValue, Row, TableSlot},
    },
};

// semana, [In-House, 1P, DD, GH, UB, Catering]
const ILLUSTRATIVE_WEEKS: [(u32, [f64; 6]); 6] = [
    (1, [4200.0, 1850.0, 1320.0, 640.0, 910.0, 600.0]),
    (2, [4480.0, 1920.0, 1410.0, 700.0, 880.0, 0.0]),
    (3, [3950.0, 2105.0, 1290.0, 615.0, 960.0, 1250.0]),
    (4, [4610.0, 2240.0, 1505.0, 720.0, 1010.0, 300.0]),
    (5, [4875.0, 2310.0, 1580.0, 690.0, 1075.0, 0.0]),
    (6, [5020.0, 2455.0, 1640.0, 745.0, 1120.0, 850.0]),
];

// Segunda a domingo
const ILLUSTRATIVE_WEEKDAYS: [(&str, f64); 7] = [
    ("Monday", 1180.0),
    ("Tuesday", 1240.0),
    ("Wednesday", 1315.0),
    ("Thursday", 1420.0),
    ("Friday", 1960.0),
    ("Saturday", 2240.0),
    ("Sunday", 1675.0),
];

// hora, vendas médias
const ILLUSTRATIVE_HOURS: [(u32, f64); 11] = [
    (11, 420.0),
    (12, 910.0),
    (13, 780.0),
    (14, 390.0),
    (15, 240.0),
    (16, 310.0),
    (17, 620.0),
    (18, 1040.0),
    (19, 1120.0),
    (20, 760.0),
    (21, 330.0),
];

/// Tabela ilustrativa para uma sub-tabela.
pub fn illustrative_table(slot: TableSlot) -> Vec<Row> {
    match slot {
        TableSlot::Weekly => ILLUSTRATIVE_WEEKS
            .iter()
            .map(|(week, amounts)| {
                let grand_total: f64 = amounts.iter().sum();
                let cells = Column::CHANNELS
                    .iter()
                    .zip(amounts)
                    .map(|(column, amount)| (column.header(), CellValue::Number(*amount)))
                    .chain([
                        (Column::Week.header(), CellValue::Number(f64::from(*week))),
                        (Column::GrandTotal.header(), CellValue::Number(grand_total)),
                    ]);
                Row::from_cells(cells)
            })
            .collect(),
        TableSlot::Weekday => vec![Row::from_cells(
            ILLUSTRATIVE_WEEKDAYS
                .iter()
                .map(|(day, amount)| (*day, CellValue::Number(*amount))),
        )],
        TableSlot::Hourly => ILLUSTRATIVE_HOURS
            .iter()
            .map(|(hour, amount)| {
                Row::from_cells([
                    ("Hour", CellValue::Text(hour_label(*hour))),
                    (Column::GrandTotal.header(), CellValue::Number(*amount)),
                ])
            })
            .collect(),
    }
}

/// Série padrão do gráfico, sempre não vazia.
pub fn default_series(kind: ChartKind, params: &ChartParams) -> ChartPoints {
    render(kind, &illustrative_table(kind.slot()), params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::columns::week_rows;

    #[test]
    fn every_chart_has_a_non_empty_finite_default() {
        let params = ChartParams::default();
        for kind in ChartKind::ALL {
            let points = default_series(kind, &params);
            assert!(!points.is_empty(), "{kind} default is empty");
            assert_eq!(points.first_non_finite(), None, "{kind}");
        }
    }

    #[test]
    fn defaults_are_constant() {
        let params = ChartParams::default();
        assert_eq!(
            default_series(ChartKind::WeeklySales, &params),
            default_series(ChartKind::WeeklySales, &params)
        );
    }

    #[test]
    fn illustrative_grand_total_matches_channels() {
        for row in week_rows(&illustrative_table(TableSlot::Weekly)) {
            assert_eq!(row.amount(Column::GrandTotal), row.sum(&Column::CHANNELS));
        }
    }

    #[test]
    fn weekly_default_keeps_one_point_per_week() {
        match default_series(ChartKind::WeeklySales, &ChartParams::default()) {
            ChartPoints::WeeklySales(points) => {
                assert_eq!(points.len(), ILLUSTRATIVE_WEEKS.len());
                assert_eq!(points[0].point.week, "Week 1");
            }
            other => panic!("unexpected points: {other:?}"),
        }
    }
}
