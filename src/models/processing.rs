// src/models/processing.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ProcessingStatus {
    /// Pedido consolidado aceito pela fornecedora.
    Processado,
    /// Envio falhou (ou a gravação do resultado falhou); pedidos ficam para a próxima rodada.
    Erro,
    /// Quantidade mínima não atingida; nada foi enviado.
    Pendente,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResellerProcessingResult {
    pub reseller_id: Uuid,
    #[schema(example = "Empresa Exemplo Ltda")]
    pub corporate_name: String,
    #[schema(example = 2)]
    pub pending_orders: usize,
    #[schema(example = 1100)]
    pub total_quantity: u64,
    pub status: ProcessingStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_order_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "AMB-48213")]
    pub order_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingSummary {
    pub total_resellers: usize,
    pub processed_resellers: usize,
    pub failed_resellers: usize,
    pub pending_resellers: usize,
    pub details: Vec<ResellerProcessingResult>,
}

impl ProcessingSummary {
    pub fn from_results(details: Vec<ResellerProcessingResult>) -> Self {
        let count = |status: ProcessingStatus| {
            details.iter().filter(|r| r.status == status).count()
        };
        Self {
            total_resellers: details.len(),
            processed_resellers: count(ProcessingStatus::Processado),
            failed_resellers: count(ProcessingStatus::Erro),
            pending_resellers: count(ProcessingStatus::Pendente),
            details,
        }
    }
}
