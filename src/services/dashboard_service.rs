// src/services/dashboard_service.rs

use crate::{
    analytics::{
        columns::Column,
        fallback,
        render::{render, ChartParams},
    },
    common::error::{AppError, TransformError},
    models::{
        charts::{ChartKind, ChartPoints, ChartSeries, FallbackPolicy, SeriesSource},
        dashboard::{ChartOptions, DashboardRequest, DashboardResponse},
        table::Workbook,
    },
};

#[derive(Clone)]
pub struct DashboardService {
    defaults: ChartParams,
    fallback: FallbackPolicy,
}

impl DashboardService {
    pub fn new(defaults: ChartParams, fallback: FallbackPolicy) -> Self {
        Self { defaults, fallback }
    }

    /// Um gráfico a partir do snapshot enviado.
    pub fn get_chart(&self, kind: ChartKind, request: &DashboardRequest) -> Result<ChartSeries, AppError> {
        let (params, policy) = self.resolve_options(&request.options)?;
        Ok(self.build(kind, &request.tables, &params, policy))
    }

    /// Todos os gráficos do dashboard, na ordem fixa de `ChartKind::ALL`.
    pub fn get_dashboard(&self, request: &DashboardRequest) -> Result<DashboardResponse, AppError> {
        let (params, policy) = self.resolve_options(&request.options)?;

        let charts: Vec<ChartSeries> = ChartKind::ALL
            .into_iter()
            .map(|kind| self.build(kind, &request.tables, &params, policy))
            .collect();
        let has_data = charts.iter().any(|chart| chart.has_data);

        Ok(DashboardResponse { has_data, charts })
    }

    /// Série ilustrativa do gráfico, independente da política (tela de depuração).
    pub fn get_default_chart(&self, kind: ChartKind) -> ChartSeries {
        ChartSeries {
            chart: kind,
            has_data: false,
            source: SeriesSource::Fallback,
            points: fallback::default_series(kind, &self.defaults),
        }
    }

    fn build(
        &self,
        kind: ChartKind,
        workbook: &Workbook,
        params: &ChartParams,
        policy: FallbackPolicy,
    ) -> ChartSeries {
        match transform(kind, workbook, params) {
            Ok(points) => ChartSeries {
                chart: kind,
                has_data: true,
                source: SeriesSource::Uploaded,
                points,
            },
            Err(err) => {
                match &err {
                    TransformError::MissingTable(_) | TransformError::EmptyTable(_) => {
                        tracing::debug!("Gráfico {} sem dados: {}", kind, err);
                    }
                    _ => {
                        tracing::warn!("⚠️ Falha ao montar o gráfico {}: {}. Usando série padrão.", kind, err);
                    }
                }

                let points = match policy {
                    FallbackPolicy::Illustrative => fallback::default_series(kind, params),
                    FallbackPolicy::Empty => ChartPoints::empty(kind),
                };
                ChartSeries {
                    chart: kind,
                    has_data: false,
                    source: SeriesSource::Fallback,
                    points,
                }
            }
        }
    }

    // Mescla as opções da requisição com os padrões da configuração
    fn resolve_options(&self, options: &ChartOptions) -> Result<(ChartParams, FallbackPolicy), AppError> {
        let params = ChartParams {
            window: options.window_size.unwrap_or(self.defaults.window),
            third_party_columns: resolve_columns(
                options.third_party_columns.as_deref(),
                &self.defaults.third_party_columns,
            )?,
            total_columns: resolve_columns(options.total_columns.as_deref(), &self.defaults.total_columns)?,
        };
        let policy = options
            .illustrative_fallback
            .map(FallbackPolicy::from_flag)
            .unwrap_or(self.fallback);

        Ok((params, policy))
    }
}

/// Monta os pontos de um gráfico ou diz por que não foi possível.
pub fn transform(
    kind: ChartKind,
    workbook: &Workbook,
    params: &ChartParams,
) -> Result<ChartPoints, TransformError> {
    let slot = kind.slot();
    let table = workbook
        .table(slot)
        .ok_or(TransformError::MissingTable(slot.key()))?;
    if table.is_empty() {
        return Err(TransformError::EmptyTable(slot.key()));
    }

    let points = render(kind, table, params);
    if points.is_empty() {
        return Err(TransformError::NoUsableRows(kind));
    }
    if let Some(field) = points.first_non_finite() {
        return Err(TransformError::NonFinite { chart: kind, field });
    }

    Ok(points)
}

// Nomes de colunas vindos do cliente -> colunas monetárias conhecidas (sem repetição)
fn resolve_columns(names: Option<&[String]>, default: &[Column]) -> Result<Vec<Column>, AppError> {
    let Some(names) = names else {
        return Ok(default.to_vec());
    };

    let mut columns = Vec::with_capacity(names.len());
    for name in names {
        let column: Column = name.parse()?;
        if !column.is_amount() {
            return Err(AppError::InvalidColumn(name.clone()));
        }
        if !columns.contains(&column) {
            columns.push(column);
        }
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{charts::WeeklyPoint, table::TableSlot};
    use serde_json::json;

    fn service() -> DashboardService {
        DashboardService::new(ChartParams::default(), FallbackPolicy::Illustrative)
    }

    fn request(body: serde_json::Value) -> DashboardRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn weekly_sales_from_uploaded_rows() {
        let series = service()
            .get_chart(
                ChartKind::WeeklySales,
                &request(json!({"tables": {"table1": [
                    {"Week": 1, "Grand Total": "$1,000.00"},
                    {"Week": 2, "Grand Total": "$2,000.00"},
                ]}})),
            )
            .unwrap();

        assert!(series.has_data);
        assert_eq!(series.source, SeriesSource::Uploaded);
        match series.points {
            ChartPoints::WeeklySales(points) => {
                let weekly: Vec<WeeklyPoint> = points.into_iter().map(|p| p.point).collect();
                assert_eq!(
                    weekly,
                    vec![
                        WeeklyPoint { week: "Week 1".into(), value: 1000.0 },
                        WeeklyPoint { week: "Week 2".into(), value: 2000.0 },
                    ]
                );
            }
            other => panic!("unexpected points: {other:?}"),
        }
    }

    #[test]
    fn empty_table_falls_back_to_the_default_series() {
        let svc = service();
        let series = svc
            .get_chart(ChartKind::WeeklySales, &request(json!({"tables": {"table1": []}})))
            .unwrap();

        assert!(!series.has_data);
        assert_eq!(series.source, SeriesSource::Fallback);
        assert!(!series.points.is_empty());
        assert_eq!(series.points, svc.get_default_chart(ChartKind::WeeklySales).points);
    }

    #[test]
    fn empty_policy_returns_no_points() {
        let series = service()
            .get_chart(
                ChartKind::ChannelMix,
                &request(json!({"options": {"illustrativeFallback": false}})),
            )
            .unwrap();

        assert!(!series.has_data);
        assert_eq!(series.points, ChartPoints::empty(ChartKind::ChannelMix));
    }

    #[test]
    fn non_finite_results_are_replaced_by_the_default() {
        let workbook = Workbook::default().with_table(
            TableSlot::Weekly,
            serde_json::from_value(json!([
                {"Week": 1, "Grand Total": 1e308},
                {"Week": 2, "Grand Total": 1e308},
                {"Week": 3, "Grand Total": 1e308},
            ]))
            .unwrap(),
        );

        assert_eq!(
            transform(ChartKind::WeeklySales, &workbook, &ChartParams::default()),
            Err(TransformError::NonFinite {
                chart: ChartKind::WeeklySales,
                field: "trend"
            })
        );

        let series = service()
            .get_chart(ChartKind::WeeklySales, &DashboardRequest { tables: workbook, ..Default::default() })
            .unwrap();
        assert_eq!(series.source, SeriesSource::Fallback);
        assert_eq!(series.points.first_non_finite(), None);
    }

    #[test]
    fn hourly_table_without_hours_has_no_usable_rows() {
        let workbook = Workbook::default().with_table(
            TableSlot::Hourly,
            serde_json::from_value(json!([{"Grand Total": "$10"}])).unwrap(),
        );
        assert_eq!(
            transform(ChartKind::Hourly, &workbook, &ChartParams::default()),
            Err(TransformError::NoUsableRows(ChartKind::Hourly))
        );
    }

    #[test]
    fn weekday_table_without_day_columns_falls_back() {
        let body = json!({"tables": {"table2": [{"Week": 1, "Grand Total": "$10"}]}});
        let req = request(body);
        assert_eq!(
            transform(ChartKind::DayOfWeek, &req.tables, &ChartParams::default()),
            Err(TransformError::NoUsableRows(ChartKind::DayOfWeek))
        );

        let series = service().get_chart(ChartKind::DayOfWeek, &req).unwrap();
        assert!(!series.has_data);
        assert_eq!(series.source, SeriesSource::Fallback);
    }

    #[test]
    fn null_or_foreign_slots_do_not_reject_the_request() {
        let series = service()
            .get_chart(
                ChartKind::WeeklySales,
                &request(json!({"tables": {
                    "table1": null,
                    "table4": {"a": 1},
                    "table5": "later",
                }})),
            )
            .unwrap();
        assert!(!series.has_data);
        assert_eq!(series.source, SeriesSource::Fallback);
        assert_eq!(series.points, service().get_default_chart(ChartKind::WeeklySales).points);

        let series = service()
            .get_chart(
                ChartKind::WeeklySales,
                &request(json!({"tables": {
                    "table1": [{"Week": 1, "Grand Total": "$5"}],
                    "table4": {"a": 1},
                }})),
            )
            .unwrap();
        assert!(series.has_data);
    }

    #[test]
    fn request_options_override_columns() {
        let series = service()
            .get_chart(
                ChartKind::FirstPartyRatio,
                &request(json!({
                    "tables": {"table1": [{"Week": 1, "1P": 50, "DD": 100, "GH": 900}]},
                    "options": {"thirdPartyColumns": ["DD", "DD"]},
                })),
            )
            .unwrap();

        match series.points {
            ChartPoints::FirstPartyRatio(points) => {
                assert_eq!(points[0].third_party, 100.0);
                assert_eq!(points[0].ratio, 50.0);
            }
            other => panic!("unexpected points: {other:?}"),
        }
    }

    #[test]
    fn unknown_or_non_amount_columns_are_rejected() {
        let unknown = service().get_chart(
            ChartKind::ShareOfTotal,
            &request(json!({"options": {"totalColumns": ["Tips"]}})),
        );
        assert!(matches!(unknown, Err(AppError::UnknownColumn(_))));

        let week = service().get_chart(
            ChartKind::ShareOfTotal,
            &request(json!({"options": {"totalColumns": ["Week"]}})),
        );
        assert!(matches!(week, Err(AppError::InvalidColumn(name)) if name == "Week"));
    }

    #[test]
    fn dashboard_renders_every_chart_and_reports_data_presence() {
        let svc = service();

        let empty = svc.get_dashboard(&DashboardRequest::default()).unwrap();
        assert!(!empty.has_data);
        assert_eq!(empty.charts.len(), ChartKind::ALL.len());
        assert!(empty.charts.iter().all(|chart| !chart.points.is_empty()));

        let partial = svc
            .get_dashboard(&request(json!({"tables": {"table2": [{"Monday": "$10"}]}})))
            .unwrap();
        assert!(partial.has_data);
        let day_of_week = partial
            .charts
            .iter()
            .find(|chart| chart.chart == ChartKind::DayOfWeek)
            .unwrap();
        assert!(day_of_week.has_data);
        assert!(partial
            .charts
            .iter()
            .filter(|chart| chart.chart != ChartKind::DayOfWeek)
            .all(|chart| chart.source == SeriesSource::Fallback));
    }
}
