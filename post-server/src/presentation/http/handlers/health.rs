use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct HealthResponseDto {
    pub(crate) status: String,
    pub(crate) message: String,
}

#[utoipa::path(
    get,
    path = "/api/healthchecker",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponseDto)
    )
)]
pub(crate) async fn health_checker() -> Json<HealthResponseDto> {
    Json(HealthResponseDto {
        status: "success".to_string(),
        message: "post server is running".to_string(),
    })
}
