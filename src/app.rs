use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_habits))
        .route("/habits", post(handlers::create_habit))
        .route("/habits/:id/toggle", patch(handlers::toggle_habit))
        .route("/day", get(handlers::get_day))
        .route("/summary", get(handlers::get_summary))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
