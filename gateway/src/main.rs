use std::sync::Arc;

use anyhow::Context;
use axum::{extract::DefaultBodyLimit, Router};
use dotenvy::dotenv;
use mathlens_ai::{gemini::GeminiClient, AiState, GeminiCfg};
use mathlens_core::ServerCfg;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    let server_cfg = ServerCfg::from_env();
    let gemini_cfg = GeminiCfg::from_env().context("upstream model is not configured")?;
    info!(model = %gemini_cfg.model, "using gemini");

    let model = GeminiClient::new(gemini_cfg).context("failed to build gemini client")?;
    let app = build_app(&server_cfg, AiState::new(Arc::new(model)));

    let addr = server_cfg.addr();
    info!("listening on http://{}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}

fn build_app(cfg: &ServerCfg, ai: AiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(mathlens_core::urls::router())
        .merge(mathlens_ai::urls::router(ai))
        .layer(DefaultBodyLimit::max(cfg.body_limit_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
