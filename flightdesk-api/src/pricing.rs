use axum::{extract::State, Json, Router};
use flightdesk_core::PricingRequest;
use serde_json::Value;

use crate::{error::AppError, extract::ApiJson, post_only, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/flight_app/price/", post_only(price_flight))
        .route("/flight_app/price", post_only(price_flight))
}

/// Returns the provider's pricing document untouched.
pub async fn price_flight(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PricingRequest>,
) -> Result<Json<Value>, AppError> {
    let priced = state.pricing.price(&request).await?;
    Ok(Json(priced))
}
