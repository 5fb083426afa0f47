use axum::{extract::State, http::StatusCode, Json};
use mathlens_core::serializers::api_error::ApiError;
use tracing::error;

use crate::data_url::decode_data_url;
use crate::serializers::mathlens_calculate::{CalculateIn, CalculateOut};
use crate::{analyze_image, AiState};

pub async fn calculate(
    State(state): State<AiState>,
    Json(inp): Json<CalculateIn>,
) -> Result<Json<CalculateOut>, (StatusCode, Json<ApiError>)> {
    let image = decode_data_url(&inp.image).map_err(internal)?;
    let data = analyze_image(state.model.as_ref(), &image, &inp.dict_of_vars).await;

    Ok(Json(CalculateOut {
        message: "Image processed",
        data,
        status: "success",
    }))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, Json<ApiError>) {
    error!(error = %e, "calculate failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError {
            error: e.to_string(),
        }),
    )
}
