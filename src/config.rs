// src/config.rs

use std::{env, net::SocketAddr, str::FromStr};

use anyhow::Context;

use crate::{
    analytics::{render::ChartParams, smoothing::DEFAULT_WINDOW},
    models::charts::FallbackPolicy,
    services::dashboard_service::DashboardService,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub trend_window: usize,
    pub illustrative_fallback: bool,
    pub max_body_bytes: usize,
}

impl Settings {
    /// Lê as variáveis de ambiente (depois de carregar o `.env`, se existir).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separado do `env` para os testes não mexerem no ambiente do processo
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = parse_or("BIND_ADDR", &lookup, DEFAULT_BIND_ADDR.parse::<SocketAddr>()?)?;
        let trend_window = parse_or("TREND_WINDOW", &lookup, DEFAULT_WINDOW)?;
        let illustrative_fallback = parse_or("ILLUSTRATIVE_FALLBACK", &lookup, true)?;
        let max_body_bytes = parse_or("MAX_BODY_BYTES", &lookup, DEFAULT_MAX_BODY_BYTES)?;

        anyhow::ensure!(
            (1..=52).contains(&trend_window),
            "TREND_WINDOW deve estar entre 1 e 52 (recebido {trend_window})"
        );

        Ok(Self {
            bind_addr,
            trend_window,
            illustrative_fallback,
            max_body_bytes,
        })
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("Valor inválido para {key}: {raw:?}")),
        _ => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let defaults = ChartParams {
            window: settings.trend_window,
            ..ChartParams::default()
        };
        let fallback = FallbackPolicy::from_flag(settings.illustrative_fallback);

        tracing::info!(
            "✅ Configuração carregada: janela de tendência {}, fallback {:?}",
            defaults.window,
            fallback
        );

        Self {
            dashboard_service: DashboardService::new(defaults, fallback),
            settings,
        }
    }
}
