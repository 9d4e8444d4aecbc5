use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/add-workout", post(handlers::add_workout))
        .route("/update-workout", post(handlers::update_workout))
        .route("/delete-workout", post(handlers::delete_workout))
        .route("/api/workouts", get(handlers::get_day))
        .route("/api/workouts/filter", get(handlers::filter_workouts))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
