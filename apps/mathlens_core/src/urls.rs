use axum::{Router, routing::get};
use crate::views::mathlens_health::{health, root};

pub fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(health))
}
