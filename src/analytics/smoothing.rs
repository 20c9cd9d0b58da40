// src/analytics/smoothing.rs

use serde::Serialize;

use crate::analytics::parsers::round2;

/// Janela padrão da média móvel.
pub const DEFAULT_WINDOW: usize = 3;

/// Ponto que expõe o valor usado na linha de tendência.
pub trait Smoothable {
    fn metric(&self) -> f64;
}

/// Ponto original + valor suavizado (`trend`), serializado no mesmo objeto.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint<P> {
    #[serde(flatten)]
    pub point: P,
    pub trend: f64,
}

/// Média móvel centrada.
///
/// Para cada índice `i` a média cobre `[i - w/2, i + w/2]`, cortada nas bordas
/// (as primeiras e últimas `w/2` posições usam uma janela menor, sem padding).
/// Se a série tiver menos pontos que a janela, a tendência é o próprio valor.
/// A entrada não é alterada; a saída tem o mesmo tamanho.
pub fn smooth<P>(points: &[P], window: usize) -> Vec<TrendPoint<P>>
where
    P: Smoothable + Clone,
{
    let n = points.len();
    if n < window {
        return points
            .iter()
            .map(|p| TrendPoint {
                point: p.clone(),
                trend: p.metric(),
            })
            .collect();
    }

    let half = window / 2;
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let neighbours = &points[i.saturating_sub(half)..=(i + half).min(n - 1)];
            let mean = neighbours.iter().map(Smoothable::metric).sum::<f64>()
                / neighbours.len() as f64;

            TrendPoint {
                point: p.clone(),
                trend: round2(mean),
            }
        })
        .collect()
}
