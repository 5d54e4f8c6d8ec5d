use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/habits", post(handlers::create_habit))
        .route("/habits/:id/edit", post(handlers::update_habit))
        .route("/habits/:id/delete", post(handlers::delete_habit))
        .route("/records", post(handlers::create_record))
        .route("/table/refresh", post(handlers::refresh_table))
        .route("/api/table", get(handlers::table))
        .route("/checkout", get(handlers::checkout))
        .route("/orders/:id", get(handlers::order))
        .route("/products/:slug", get(handlers::product))
        .with_state(state)
}
