//! Public quote estimation endpoint.

use axum::extract::Json;
use serde::{Deserialize, Serialize};

use crate::pricing::{compute_quote, format_eur, Addon, Complexity, QuoteSelection, Service};

/// Request payload mirroring the calculator widget state.
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub complexity: Complexity,
    #[serde(default)]
    pub addons: Vec<Addon>,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub total: u32,
    pub estimated_duration_days: u32,
    /// fr-FR currency rendering of `total`, e.g. "4 550 €".
    pub formatted_total: String,
}

pub async fn create_estimate(Json(request): Json<EstimateRequest>) -> Json<EstimateResponse> {
    let selection =
        QuoteSelection::from_parts(&request.services, request.complexity, &request.addons);
    let result = compute_quote(&selection);

    Json(EstimateResponse {
        total: result.total,
        estimated_duration_days: result.estimated_duration_days,
        formatted_total: format_eur(result.total),
    })
}
