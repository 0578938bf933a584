// src/handlers/supplier_orders.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, models::supplier::SupplierOrder};

// GET /api/supplier-orders/{id}
#[utoipa::path(
    get,
    path = "/api/supplier-orders/{id}",
    tag = "Processing",
    params(("id" = Uuid, Path, description = "ID do pedido consolidado")),
    responses(
        (status = 200, description = "Pedido consolidado com o status do envio", body = SupplierOrder),
        (status = 404, description = "Pedido à fornecedora não encontrado")
    )
)]
pub async fn get_supplier_order(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.processing_service.get_supplier_order(id).await?;
    Ok((StatusCode::OK, Json(order)))
}

// GET /api/resellers/{id}/supplier-orders
#[utoipa::path(
    get,
    path = "/api/resellers/{id}/supplier-orders",
    tag = "Processing",
    params(("id" = Uuid, Path, description = "ID da revenda")),
    responses(
        (status = 200, description = "Histórico de envios da revenda", body = Vec<SupplierOrder>),
        (status = 404, description = "Revenda não encontrada")
    )
)]
pub async fn list_reseller_supplier_orders(
    State(app_state): State<AppState>,
    WithRejection(Path(reseller_id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state
        .processing_service
        .list_supplier_orders(reseller_id)
        .await?;
    Ok((StatusCode::OK, Json(orders)))
}
