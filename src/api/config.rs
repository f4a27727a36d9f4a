//! Read-only policy configuration endpoint.
//!
//! Dashboard clients fetch this once at load to calibrate their display
//! (target band markers, refresh progress bar).

use crate::api::AppState;
use axum::extract::State;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub contract_address: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub target_hf: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tolerance: Decimal,
    pub refresh_interval: u64,
}

pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        contract_address: state.config.contract_address.to_string(),
        target_hf: state.config.target_hf,
        tolerance: state.config.tolerance,
        refresh_interval: state.config.refresh_interval_secs,
    })
}
