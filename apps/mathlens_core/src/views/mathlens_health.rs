use axum::Json;
use crate::serializers::mathlens_health::{Banner, Health};

pub async fn root() -> Json<Banner> {
    Json(Banner { message: "Server is running" })
}

pub async fn health() -> Json<Health> {
    Json(Health { ok: true, service: "mathlens" })
}
