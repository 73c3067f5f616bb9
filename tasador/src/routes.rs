//! HTTP API routes.

use crate::error::EstimateError;
use crate::exchange::{ExchangeRateProvider, OpenErApiProvider};
use crate::pricing::PriceTable;
use crate::valuation::{Appraiser, FactorConfig, PropertyInput};
use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tasador_common::config::Config;
use tasador_common::logging::generate_request_id;
use tracing::Instrument;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub prices: Arc<PriceTable>,
    pub appraiser: Arc<Appraiser>,
}

impl AppState {
    pub fn new(
        prices: Arc<PriceTable>,
        factors: Arc<FactorConfig>,
        rates: Arc<dyn ExchangeRateProvider>,
    ) -> Self {
        let appraiser = Appraiser::with_factors(factors, prices.clone(), rates);
        Self {
            prices,
            appraiser: Arc::new(appraiser),
        }
    }

    /// Build from configuration: data files when configured, built-in
    /// defaults otherwise, and the live exchange rate provider.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let prices = match &config.valuation.price_table_path {
            Some(path) => PriceTable::load_from(path)
                .with_context(|| format!("Failed to load price table {}", path.display()))?,
            None => {
                tracing::info!("Using built-in Lima 2024 price table");
                PriceTable::lima_2024()
            }
        };

        let factors = match &config.valuation.factors_path {
            Some(path) => {
                let factors = FactorConfig::load_from(path)
                    .with_context(|| format!("Failed to load factors {}", path.display()))?;
                tracing::info!(path = %path.display(), "Loaded factor table");
                factors
            }
            None => FactorConfig::default(),
        };

        let rates = OpenErApiProvider::from_config(&config.exchange_rate);

        Ok(Self::new(Arc::new(prices), Arc::new(factors), Arc::new(rates)))
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Catalogue
        .route("/api/v1/districts", get(list_districts))
        .route("/api/v1/districts/:district/zones", get(list_zones))
        // Valuation
        .route("/api/v1/estimate", post(estimate))
        .with_state(state)
}

// ============ Health Check ============

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "tasador",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// ============ Catalogue ============

async fn list_districts(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "districts": state.prices.districts()
    }))
}

async fn list_zones(
    State(state): State<AppState>,
    Path(district): Path<String>,
) -> Result<impl IntoResponse, EstimateError> {
    let zones = state
        .prices
        .zones(&district)
        .ok_or_else(|| EstimateError::UnknownDistrict(district.clone()))?;

    Ok(Json(serde_json::json!({
        "district": district,
        "zones": zones
    })))
}

// ============ Valuation ============

async fn estimate(
    State(state): State<AppState>,
    body: Result<Json<PropertyInput>, JsonRejection>,
) -> Result<impl IntoResponse, EstimateError> {
    let Json(input) = body?;
    let span = tracing::info_span!("estimate", request_id = %generate_request_id());
    let result = state.appraiser.estimate(&input).instrument(span).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": result
    })))
}
