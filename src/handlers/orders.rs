// src/handlers/orders.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::order::LineItem};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    pub reseller_id: Uuid,

    pub client_id: Uuid,

    #[validate(length(min = 1, message = "O pedido deve conter pelo menos um item."), nested)]
    pub items: Vec<LineItem>,

    #[schema(example = "Manter refrigerado. Entregar somente no período da manhã.")]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedResponse {
    #[schema(example = "Pedido criado com sucesso")]
    pub message: String,
    pub order_id: Uuid,
    pub client_id: Uuid,
    pub reseller_id: Uuid,
}

// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido cadastrado", body = OrderCreatedResponse),
        (status = 400, description = "Dados incompletos"),
        (status = 404, description = "Revenda ou cliente não encontrado")
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateOrderPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let order = app_state
        .reseller_service
        .register_order(payload.reseller_id, payload.client_id, payload.items, payload.notes)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderCreatedResponse {
            message: "Pedido criado com sucesso".to_string(),
            order_id: order.id,
            client_id: order.client_id,
            reseller_id: payload.reseller_id,
        }),
    ))
}
