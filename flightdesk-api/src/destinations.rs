use axum::{extract::State, Json, Router};
use flightdesk_core::Destination;
use flightdesk_offer::DestinationQuery;

use crate::{error::AppError, extract::ApiJson, post_only, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/flight_app/search-destinations/", post_only(search_destinations))
        .route("/flight_app/search-destinations", post_only(search_destinations))
}

pub async fn search_destinations(
    State(state): State<AppState>,
    ApiJson(query): ApiJson<DestinationQuery>,
) -> Result<Json<Vec<Destination>>, AppError> {
    let destinations = state.destinations.lookup(&query).await?;
    Ok(Json(destinations))
}
