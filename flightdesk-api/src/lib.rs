use axum::{
    handler::Handler,
    http::{header, Method},
    routing::{get, post, MethodRouter},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub mod bookings;
pub mod destinations;
pub mod error;
pub mod extract;
pub mod pricing;
pub mod search;
pub mod state;

pub use error::AppError;
pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health))
        .merge(destinations::routes())
        .merge(search::routes())
        .merge(pricing::routes())
        .merge(bookings::routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(error::panic_response))
                .layer(cors),
        )
        .with_state(state)
}

/// POST route whose other methods answer with a JSON 405.
pub(crate) fn post_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    post(handler).fallback(error::method_not_allowed)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
