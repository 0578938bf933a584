// src/handlers/resellers.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::reseller::{NewClient, NewReseller, Reseller},
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResellerCreatedResponse {
    #[schema(example = "Revenda cadastrada com sucesso")]
    pub message: String,
    pub id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientCreatedResponse {
    #[schema(example = "Cliente cadastrado com sucesso")]
    pub message: String,
    pub client_id: Uuid,
    pub reseller_id: Uuid,
}

// POST /api/resellers
#[utoipa::path(
    post,
    path = "/api/resellers",
    tag = "Resellers",
    request_body = NewReseller,
    responses(
        (status = 201, description = "Revenda cadastrada", body = ResellerCreatedResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "ID já cadastrado")
    )
)]
pub async fn create_reseller(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<NewReseller>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let reseller = app_state.reseller_service.register_reseller(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResellerCreatedResponse {
            message: "Revenda cadastrada com sucesso".to_string(),
            id: reseller.id,
        }),
    ))
}

// GET /api/resellers
#[utoipa::path(
    get,
    path = "/api/resellers",
    tag = "Resellers",
    responses(
        (status = 200, description = "Lista de revendas", body = Vec<Reseller>)
    )
)]
pub async fn list_resellers(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let resellers = app_state.reseller_service.list_resellers().await?;
    Ok((StatusCode::OK, Json(resellers)))
}

// GET /api/resellers/{id}
#[utoipa::path(
    get,
    path = "/api/resellers/{id}",
    tag = "Resellers",
    params(("id" = Uuid, Path, description = "ID da revenda")),
    responses(
        (status = 200, description = "Revenda com clientes e pedidos", body = Reseller),
        (status = 404, description = "Revenda não encontrada")
    )
)]
pub async fn get_reseller(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let reseller = app_state.reseller_service.get_reseller(id).await?;
    Ok((StatusCode::OK, Json(reseller)))
}

// DELETE /api/resellers/{id}
#[utoipa::path(
    delete,
    path = "/api/resellers/{id}",
    tag = "Resellers",
    params(("id" = Uuid, Path, description = "ID da revenda")),
    responses(
        (status = 204, description = "Revenda removida"),
        (status = 404, description = "Revenda não encontrada")
    )
)]
pub async fn delete_reseller(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    app_state.reseller_service.delete_reseller(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/resellers/{id}/clients
#[utoipa::path(
    post,
    path = "/api/resellers/{id}/clients",
    tag = "Resellers",
    params(("id" = Uuid, Path, description = "ID da revenda")),
    request_body = NewClient,
    responses(
        (status = 201, description = "Cliente cadastrado", body = ClientCreatedResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Revenda não encontrada"),
        (status = 409, description = "ID de cliente já cadastrado")
    )
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    WithRejection(Path(reseller_id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<NewClient>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state
        .reseller_service
        .register_client(reseller_id, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ClientCreatedResponse {
            message: "Cliente cadastrado com sucesso".to_string(),
            client_id: client.id,
            reseller_id,
        }),
    ))
}
