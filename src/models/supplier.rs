// src/models/supplier.rs

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::reseller::Reseller;

/// Soma de um produto sobre todos os pedidos pendentes de uma revenda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedLineItem {
    #[schema(example = "CERV-IPA")]
    pub product: String,
    #[schema(example = 1100)]
    pub quantity: u64,
    // Preço do primeiro item visto para o produto.
    #[schema(example = "18.50")]
    pub unit_price: Decimal,
    // Um ID por item contribuinte (repetido se o pedido tiver o produto duas vezes).
    pub order_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SupplierOrderStatus {
    #[default]
    Pendente,
    Enviado,
    Erro,
}

/// Pedido consolidado enviado à fornecedora.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierOrder {
    pub id: Uuid,
    pub reseller_id: Uuid,
    pub reseller_cnpj: String,
    pub corporate_name: String,
    pub trade_name: String,
    pub items: Vec<AggregatedLineItem>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: SupplierOrderStatus,
    pub total_quantity: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_number: Option<String>,
}

impl SupplierOrder {
    pub fn new(reseller: &Reseller, items: Vec<AggregatedLineItem>) -> Self {
        let total_quantity = items.iter().map(|i| i.quantity).sum();
        Self {
            id: Uuid::new_v4(),
            reseller_id: reseller.id,
            reseller_cnpj: reseller.cnpj.clone(),
            corporate_name: reseller.corporate_name.clone(),
            trade_name: reseller.trade_name.clone(),
            items,
            created_at: Utc::now(),
            status: SupplierOrderStatus::Pendente,
            total_quantity,
            confirmation_number: None,
        }
    }

    pub fn contributing_order_ids(&self) -> HashSet<Uuid> {
        self.items
            .iter()
            .flat_map(|i| i.order_ids.iter().copied())
            .collect()
    }

    pub fn record_outcome(&mut self, outcome: &SubmissionOutcome) {
        match outcome {
            SubmissionOutcome::Accepted(number) => {
                self.status = SupplierOrderStatus::Enviado;
                self.confirmation_number = Some(number.clone());
            }
            SubmissionOutcome::Rejected(_) | SubmissionOutcome::TransportFailure(_) => {
                self.status = SupplierOrderStatus::Erro;
            }
        }
    }
}

/// Resultado de uma tentativa de envio à fornecedora.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Número de confirmação emitido pela fornecedora.
    Accepted(String),
    /// Recusa de negócio (estoque, crédito, capacidade...).
    Rejected(String),
    /// A chamada não se completou (rede, timeout, protocolo).
    TransportFailure(String),
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted(_))
    }

    pub fn confirmation_number(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Accepted(number) => Some(number),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SubmissionOutcome::Accepted(_) => {
                "Pedido enviado com sucesso para a fornecedora".to_string()
            }
            SubmissionOutcome::Rejected(reason) => {
                format!("Falha ao enviar pedido para a fornecedora: {}", reason)
            }
            SubmissionOutcome::TransportFailure(reason) => {
                format!("Erro ao conectar com a API da fornecedora: {}", reason)
            }
        }
    }
}
