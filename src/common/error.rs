// src/common/error.rs

use std::collections::HashMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;
use validator::{ValidationErrors, ValidationErrorsKind};

// Taxonomia de erros da aplicação. Falhas da fornecedora NÃO passam por aqui:
// elas viram `SubmissionOutcome` e só mudam o status dos pedidos.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Corpo da requisição inválido: {0}")]
    JsonRejection(#[from] JsonRejection),

    #[error("Parâmetro de rota inválido: {0}")]
    PathRejection(#[from] PathRejection),

    #[error("Revenda não encontrada: {0}")]
    ResellerNotFound(Uuid),

    #[error("Cliente não encontrado: {0}")]
    ClientNotFound(Uuid),

    #[error("Pedido à fornecedora não encontrado: {0}")]
    SupplierOrderNotFound(Uuid),

    #[error("Nenhuma revenda encontrada")]
    NoResellersFound,

    #[error("Revenda já cadastrada: {0}")]
    ResellerAlreadyExists(Uuid),

    #[error("Cliente já cadastrado: {0}")]
    ClientAlreadyExists(Uuid),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de serialização: {0}")]
    SerializationError(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidInput(_)
            | AppError::JsonRejection(_)
            | AppError::PathRejection(_) => StatusCode::BAD_REQUEST,
            AppError::ResellerNotFound(_)
            | AppError::ClientNotFound(_)
            | AppError::SupplierOrderNotFound(_)
            | AppError::NoResellersFound => StatusCode::NOT_FOUND,
            AppError::ResellerAlreadyExists(_) | AppError::ClientAlreadyExists(_) => {
                StatusCode::CONFLICT
            }
            AppError::DatabaseError(_)
            | AppError::SerializationError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Achata os erros do validator (inclusive os de structs e listas aninhadas)
// em "campo" -> mensagens. Itens de lista viram "items[0].product".
fn collect_validation_messages(
    prefix: &str,
    errors: &ValidationErrors,
    out: &mut HashMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                out.insert(path, messages);
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_messages(&path, nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_messages(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (error, message) = match &self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                collect_validation_messages("", errors, &mut details);
                let body = Json(json!({
                    "error": "Dados inválidos",
                    "message": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::InvalidInput(message) => ("Dados inválidos", message.clone()),
            AppError::JsonRejection(rejection) => ("Dados inválidos", rejection.body_text()),
            AppError::PathRejection(rejection) => ("Parâmetro inválido", rejection.body_text()),
            AppError::ResellerNotFound(id) => (
                "Revenda não encontrada",
                format!("Não foi possível encontrar uma revenda com ID: {}", id),
            ),
            AppError::ClientNotFound(id) => (
                "Cliente não encontrado",
                format!("Não foi possível encontrar um cliente com ID: {} nesta revenda", id),
            ),
            AppError::SupplierOrderNotFound(id) => (
                "Pedido à fornecedora não encontrado",
                format!("Não foi possível encontrar um pedido à fornecedora com ID: {}", id),
            ),
            AppError::NoResellersFound => (
                "Nenhuma revenda encontrada",
                "Não há revendas cadastradas para processar.".to_string(),
            ),
            AppError::ResellerAlreadyExists(id) => (
                "Revenda já cadastrada",
                format!("Já existe uma revenda com ID: {}", id),
            ),
            AppError::ClientAlreadyExists(id) => (
                "Cliente já cadastrado",
                format!("Já existe um cliente com ID: {} nesta revenda", id),
            ),

            // O detalhe fica só no log; o chamador recebe uma mensagem genérica.
            e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                (
                    "Erro interno do servidor",
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error, "message": message }));
        (status, body).into_response()
    }
}
