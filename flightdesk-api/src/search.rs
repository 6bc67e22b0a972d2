use axum::{extract::State, Json, Router};
use flightdesk_core::SearchRequest;
use flightdesk_offer::SearchResults;

use crate::{error::AppError, extract::ApiJson, post_only, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/flight_app/search/", post_only(search_flights))
        .route("/flight_app/search", post_only(search_flights))
}

pub async fn search_flights(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SearchRequest>,
) -> Result<Json<SearchResults>, AppError> {
    let results = state.search.search(&request).await?;
    Ok(Json(results))
}
