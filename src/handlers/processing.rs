// src/handlers/processing.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::processing::{ProcessingSummary, ResellerProcessingResult},
};

// POST /api/orders/process
#[utoipa::path(
    post,
    path = "/api/orders/process",
    tag = "Processing",
    responses(
        (status = 200, description = "Resumo da rodada por revenda", body = ProcessingSummary),
        (status = 404, description = "Nenhuma revenda cadastrada")
    )
)]
pub async fn process_pending_orders(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.processing_service.process_pending_orders().await?;
    Ok((StatusCode::OK, Json(summary)))
}

// POST /api/resellers/{id}/process
#[utoipa::path(
    post,
    path = "/api/resellers/{id}/process",
    tag = "Processing",
    params(("id" = Uuid, Path, description = "ID da revenda")),
    responses(
        (status = 200, description = "Resultado do processamento da revenda", body = ResellerProcessingResult),
        (status = 404, description = "Revenda não encontrada")
    )
)]
pub async fn process_reseller(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let result = app_state.processing_service.process_reseller_by_id(id).await?;

    let body = match result {
        Some(result) => json!(result),
        None => json!({
            "resellerId": id,
            "message": "Nenhum pedido pendente para esta revenda",
        }),
    };
    Ok((StatusCode::OK, Json(body)))
}
