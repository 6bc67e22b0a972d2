use axum::{extract::State, Json, Router};
use flightdesk_core::{BookingConfirmation, BookingRequest};

use crate::{error::AppError, extract::ApiJson, post_only, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/flight_app/book/", post_only(book_flight))
        .route("/flight_app/book", post_only(book_flight))
}

pub async fn book_flight(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<BookingRequest>,
) -> Result<Json<BookingConfirmation>, AppError> {
    let confirmation = state.bookings.assemble(request)?;
    Ok(Json(confirmation))
}
