use axum::{Router, routing::post};
use crate::views::mathlens_calculate::calculate;
use crate::AiState;

pub fn router(state: AiState) -> Router {
    Router::new()
        .route("/calculate/", post(calculate))
        .route("/calculate", post(calculate))
        .with_state(state)
}
