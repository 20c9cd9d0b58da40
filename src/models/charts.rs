// src/models/charts.rs

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analytics::smoothing::{Smoothable, TrendPoint};
use crate::models::table::TableSlot;

// --- Tipos de gráfico ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    WeeklySales,
    ChannelBreakdown,
    FirstPartyRatio,
    ShareOfTotal,
    ChannelMix,
    DayOfWeek,
    Hourly,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::WeeklySales,
        ChartKind::ChannelBreakdown,
        ChartKind::FirstPartyRatio,
        ChartKind::ShareOfTotal,
        ChartKind::ChannelMix,
        ChartKind::DayOfWeek,
        ChartKind::Hourly,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ChartKind::WeeklySales => "weekly-sales",
            ChartKind::ChannelBreakdown => "channel-breakdown",
            ChartKind::FirstPartyRatio => "first-party-ratio",
            ChartKind::ShareOfTotal => "share-of-total",
            ChartKind::ChannelMix => "channel-mix",
            ChartKind::DayOfWeek => "day-of-week",
            ChartKind::Hourly => "hourly",
        }
    }

    /// Sub-tabela de onde o gráfico lê os dados.
    pub fn slot(self) -> TableSlot {
        match self {
            ChartKind::DayOfWeek => TableSlot::Weekday,
            ChartKind::Hourly => TableSlot::Hourly,
            _ => TableSlot::Weekly,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| s.to_string())
    }
}

// --- Pontos das séries ---

// 1. Vendas semanais (linha + tendência)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPoint {
    pub week: String,
    pub value: f64,
}

impl Smoothable for WeeklyPoint {
    fn metric(&self) -> f64 {
        self.value
    }
}

// 2. Barras empilhadas por canal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPoint {
    pub week: String,
    pub in_house: f64,
    pub first_party: f64,
    pub door_dash: f64,
    pub grubhub: f64,
    pub uber_eats: f64,
    pub catering: f64,
}

// 3. Razão 1P/3P (gráfico composto)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioPoint {
    pub week: String,
    pub first_party: f64,
    pub third_party: f64,
    pub ratio: f64,
    pub label: String,
}

// 4. Percentual de cada canal sobre o total da semana
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareBreakdown {
    pub week: String,
    pub total: f64,
    // chave = nome do campo do canal ("doorDash"), valor = percentual
    #[serde(flatten)]
    pub shares: BTreeMap<String, f64>,
}

// 5. Pizza: participação de cada canal na tabela inteira
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlicePoint {
    pub name: String,
    pub value: f64,
    pub percentage: f64,
    pub label: String,
}

// 6. Média por dia da semana
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPoint {
    pub day: String,
    pub value: f64,
}

// 7. Média por hora do dia
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourPoint {
    pub hour: String,
    pub value: f64,
}

/// Pontos de um gráfico; cada variante tem o formato fixo esperado pelo
/// componente de renderização.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartPoints {
    WeeklySales(Vec<TrendPoint<WeeklyPoint>>),
    ChannelBreakdown(Vec<CategoryPoint>),
    FirstPartyRatio(Vec<RatioPoint>),
    ShareOfTotal(Vec<ShareBreakdown>),
    ChannelMix(Vec<SlicePoint>),
    DayOfWeek(Vec<DayPoint>),
    Hourly(Vec<HourPoint>),
}

impl ChartPoints {
    pub fn empty(kind: ChartKind) -> Self {
        match kind {
            ChartKind::WeeklySales => ChartPoints::WeeklySales(Vec::new()),
            ChartKind::ChannelBreakdown => ChartPoints::ChannelBreakdown(Vec::new()),
            ChartKind::FirstPartyRatio => ChartPoints::FirstPartyRatio(Vec::new()),
            ChartKind::ShareOfTotal => ChartPoints::ShareOfTotal(Vec::new()),
            ChartKind::ChannelMix => ChartPoints::ChannelMix(Vec::new()),
            ChartKind::DayOfWeek => ChartPoints::DayOfWeek(Vec::new()),
            ChartKind::Hourly => ChartPoints::Hourly(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ChartPoints::WeeklySales(points) => points.len(),
            ChartPoints::ChannelBreakdown(points) => points.len(),
            ChartPoints::FirstPartyRatio(points) => points.len(),
            ChartPoints::ShareOfTotal(points) => points.len(),
            ChartPoints::ChannelMix(points) => points.len(),
            ChartPoints::DayOfWeek(points) => points.len(),
            ChartPoints::Hourly(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Primeiro campo numérico não finito, se houver (NaN/∞ nunca podem sair).
    pub fn first_non_finite(&self) -> Option<&'static str> {
        fn scan<'a, T: 'a>(
            points: &'a [T],
            fields: impl Fn(&'a T) -> Vec<(&'static str, f64)>,
        ) -> Option<&'static str> {
            points
                .iter()
                .flat_map(fields)
                .find(|(_, value)| !value.is_finite())
                .map(|(field, _)| field)
        }

        match self {
            ChartPoints::WeeklySales(points) => scan(points, |p| {
                vec![("value", p.point.value), ("trend", p.trend)]
            }),
            ChartPoints::ChannelBreakdown(points) => scan(points, |p| {
                vec![
                    ("inHouse", p.in_house),
                    ("firstParty", p.first_party),
                    ("doorDash", p.door_dash),
                    ("grubhub", p.grubhub),
                    ("uberEats", p.uber_eats),
                    ("catering", p.catering),
                ]
            }),
            ChartPoints::FirstPartyRatio(points) => scan(points, |p| {
                vec![
                    ("firstParty", p.first_party),
                    ("thirdParty", p.third_party),
                    ("ratio", p.ratio),
                ]
            }),
            ChartPoints::ShareOfTotal(points) => scan(points, |p| {
                std::iter::once(("total", p.total))
                    .chain(p.shares.values().map(|share| ("share", *share)))
                    .collect()
            }),
            ChartPoints::ChannelMix(points) => scan(points, |p| {
                vec![("value", p.value), ("percentage", p.percentage)]
            }),
            ChartPoints::DayOfWeek(points) => scan(points, |p| vec![("value", p.value)]),
            ChartPoints::Hourly(points) => scan(points, |p| vec![("value", p.value)]),
        }
    }
}

// --- Envelope de resposta ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesSource {
    Uploaded,
    Fallback,
}

/// O que fazer quando não há dados para um gráfico.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Série ilustrativa fixa (o gráfico nunca fica vazio).
    Illustrative,
    /// Série vazia; o front decide o que mostrar.
    Empty,
}

impl FallbackPolicy {
    pub fn from_flag(illustrative: bool) -> Self {
        if illustrative {
            FallbackPolicy::Illustrative
        } else {
            FallbackPolicy::Empty
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub chart: ChartKind,
    /// `false` sempre que os pontos não vieram dos dados enviados.
    pub has_data: bool,
    pub source: SeriesSource,
    pub points: ChartPoints,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chart_kinds_round_trip_through_slugs() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.slug().parse::<ChartKind>(), Ok(kind));
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.slug()));
        }
        assert!("pie".parse::<ChartKind>().is_err());
    }

    #[test]
    fn share_breakdown_flattens_channel_fields() {
        let point = ShareBreakdown {
            week: "Week 1".into(),
            total: 200.0,
            shares: BTreeMap::from([("doorDash".to_string(), 25.0), ("inHouse".to_string(), 75.0)]),
        };

        assert_eq!(
            serde_json::to_value(&point).unwrap(),
            json!({"week": "Week 1", "total": 200.0, "doorDash": 25.0, "inHouse": 75.0})
        );
    }

    #[test]
    fn non_finite_fields_are_reported() {
        let points = ChartPoints::FirstPartyRatio(vec![RatioPoint {
            week: "Week 1".into(),
            first_party: f64::INFINITY,
            third_party: 1.0,
            ratio: 0.0,
            label: "0.00%".into(),
        }]);
        assert_eq!(points.first_non_finite(), Some("firstParty"));
        assert_eq!(ChartPoints::empty(ChartKind::Hourly).first_non_finite(), None);
    }
}
