// src/services/submission.rs

use std::sync::Arc;
use std::time::Duration;

use crate::{
    models::supplier::{SubmissionOutcome, SupplierOrder},
    services::partner_client::{PartnerClient, PartnerError},
};

/// Envia um pedido consolidado à fornecedora, uma única vez, com tempo limite.
/// Não há retentativa aqui: pedidos que falham ficam em `Erro` e voltam
/// na próxima rodada de processamento.
#[derive(Clone)]
pub struct SubmissionPipeline {
    partner: Arc<dyn PartnerClient>,
    timeout: Duration,
}

impl SubmissionPipeline {
    pub fn new(partner: Arc<dyn PartnerClient>, timeout: Duration) -> Self {
        Self { partner, timeout }
    }

    pub async fn submit(&self, order: &SupplierOrder) -> SubmissionOutcome {
        let call = self.partner.submit_order(order);
        let outcome = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(number)) => SubmissionOutcome::Accepted(number),
            Ok(Err(PartnerError::Rejected(reason))) => SubmissionOutcome::Rejected(reason),
            Ok(Err(PartnerError::Transport(reason))) => {
                SubmissionOutcome::TransportFailure(reason)
            }
            Err(_) => SubmissionOutcome::TransportFailure(format!(
                "Timeout na conexão ({}s)",
                self.timeout.as_secs()
            )),
        };

        match &outcome {
            SubmissionOutcome::Accepted(number) => tracing::info!(
                supplier_order_id = %order.id,
                reseller_id = %order.reseller_id,
                "Pedido enviado com sucesso para a fornecedora. Número: {}",
                number
            ),
            SubmissionOutcome::Rejected(reason) => tracing::warn!(
                supplier_order_id = %order.id,
                reseller_id = %order.reseller_id,
                "Fornecedora recusou o pedido: {}",
                reason
            ),
            SubmissionOutcome::TransportFailure(reason) => tracing::warn!(
                supplier_order_id = %order.id,
                reseller_id = %order.reseller_id,
                "Falha ao contatar a fornecedora: {}",
                reason
            ),
        }

        outcome
    }
}
