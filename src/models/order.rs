// src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::error::AppError;

// --- Enums ---

// Ciclo de vida do pedido do cliente: Novo -> {Enviado, Erro}, Erro -> {Enviado, Erro}.
// Enviado é terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    #[default]
    Novo,
    Erro,
    Enviado,
}

impl OrderStatus {
    /// Pedidos `Novo` e `Erro` entram na próxima consolidação.
    pub fn is_pending(self) -> bool {
        matches!(self, OrderStatus::Novo | OrderStatus::Erro)
    }

    /// Próximo estado depois de uma tentativa de envio.
    pub fn after_submission(self, accepted: bool) -> OrderStatus {
        match self {
            OrderStatus::Enviado => OrderStatus::Enviado,
            _ if accepted => OrderStatus::Enviado,
            _ => OrderStatus::Erro,
        }
    }
}

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// --- Itens ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[validate(length(min = 1, message = "O produto é obrigatório."))]
    #[schema(example = "CERV-IPA")]
    pub product: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Cerveja Artesanal IPA")]
    pub product_name: Option<String>,

    #[schema(example = 500)]
    pub quantity: u32,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "18.50")]
    pub unit_price: Decimal,
}

impl LineItem {
    // Nunca guardado: qualquer `valorTotal` vindo do cliente é ignorado.
    // `None` quando o produto não cabe em um Decimal.
    pub fn total_value(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

fn order_total(items: &[LineItem]) -> Result<Decimal, AppError> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        item.total_value()
            .and_then(|value| total.checked_add(value))
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "Valor total do pedido excede o limite suportado (produto {})",
                    item.product
                ))
            })
    })
}

// --- Pedido do cliente ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientOrder {
    pub id: Uuid,
    pub client_id: Uuid,
    pub ordered_at: DateTime<Utc>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[schema(example = "9250.00")]
    pub total_value: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Manter refrigerado.")]
    pub notes: Option<String>,
}

impl ClientOrder {
    pub fn new(
        client_id: Uuid,
        items: Vec<LineItem>,
        notes: Option<String>,
    ) -> Result<Self, AppError> {
        let total_value = order_total(&items)?;
        Ok(Self {
            id: Uuid::new_v4(),
            client_id,
            ordered_at: Utc::now(),
            status: OrderStatus::Novo,
            items,
            total_value,
            notes,
        })
    }

    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}
