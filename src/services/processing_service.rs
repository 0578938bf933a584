// src/services/processing_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ResellerStore, SupplierOrderStore},
    models::{
        order::OrderStatus,
        processing::{ProcessingStatus, ProcessingSummary, ResellerProcessingResult},
        reseller::Reseller,
        supplier::SupplierOrder,
    },
    services::{
        aggregation::{group_by_product, select_pending, total_quantity, ThresholdGate},
        status_ledger::{apply_outcome, count_with_status},
        submission::SubmissionPipeline,
    },
};

/// Rodada de consolidação: para cada revenda, agrupa os pedidos pendentes,
/// verifica o mínimo, envia à fornecedora e grava os novos status.
#[derive(Clone)]
pub struct ProcessingService {
    store: Arc<dyn ResellerStore>,
    supplier_orders: Arc<dyn SupplierOrderStore>,
    pipeline: SubmissionPipeline,
    gate: ThresholdGate,
    page_size: i64,
}

impl ProcessingService {
    pub fn new(
        store: Arc<dyn ResellerStore>,
        supplier_orders: Arc<dyn SupplierOrderStore>,
        pipeline: SubmissionPipeline,
        gate: ThresholdGate,
        page_size: i64,
    ) -> Self {
        Self {
            store,
            supplier_orders,
            pipeline,
            gate,
            page_size,
        }
    }

    /// Processa todas as revendas. A falha de uma revenda não interrompe as
    /// demais: ela aparece no resumo com status `Erro`.
    pub async fn process_pending_orders(&self) -> Result<ProcessingSummary, AppError> {
        tracing::info!("Iniciando processamento de pedidos de todas as revendas");

        let resellers = self.store.list_all_resellers(self.page_size).await?;
        if resellers.is_empty() {
            return Err(AppError::NoResellersFound);
        }

        let mut results = Vec::new();
        for reseller in resellers {
            if let Some(result) = self.process_reseller(reseller).await {
                results.push(result);
            }
        }

        let summary = ProcessingSummary::from_results(results);
        tracing::info!(
            total = summary.total_resellers,
            processed = summary.processed_resellers,
            failed = summary.failed_resellers,
            pending = summary.pending_resellers,
            "Processamento de pedidos concluído"
        );
        Ok(summary)
    }

    /// Processa uma única revenda. `None` quando ela não tem pedidos pendentes.
    pub async fn process_reseller_by_id(
        &self,
        reseller_id: Uuid,
    ) -> Result<Option<ResellerProcessingResult>, AppError> {
        let reseller = self
            .store
            .get_reseller(reseller_id)
            .await?
            .ok_or(AppError::ResellerNotFound(reseller_id))?;

        Ok(self.process_reseller(reseller).await)
    }

    pub async fn get_supplier_order(&self, id: Uuid) -> Result<SupplierOrder, AppError> {
        self.supplier_orders
            .get_supplier_order(id)
            .await?
            .ok_or(AppError::SupplierOrderNotFound(id))
    }

    /// Histórico de envios da revenda, mais antigos primeiro.
    pub async fn list_supplier_orders(
        &self,
        reseller_id: Uuid,
    ) -> Result<Vec<SupplierOrder>, AppError> {
        if self.store.get_reseller(reseller_id).await?.is_none() {
            return Err(AppError::ResellerNotFound(reseller_id));
        }
        self.supplier_orders.list_supplier_orders(reseller_id).await
    }

    async fn process_reseller(&self, mut reseller: Reseller) -> Option<ResellerProcessingResult> {
        let pending = select_pending(&reseller);
        if pending.is_empty() {
            return None;
        }

        let pending_orders = pending.len();
        let items = group_by_product(&pending);
        let quantity = total_quantity(&items);

        tracing::info!(
            reseller_id = %reseller.id,
            "Processando revenda {} ({}) - {} pedidos pendentes, {} itens",
            reseller.id,
            reseller.corporate_name,
            pending_orders,
            quantity
        );

        let mut result = ResellerProcessingResult {
            reseller_id: reseller.id,
            corporate_name: reseller.corporate_name.clone(),
            pending_orders,
            total_quantity: quantity,
            status: ProcessingStatus::Pendente,
            message: String::new(),
            supplier_order_id: None,
            order_number: None,
        };

        if !self.gate.is_eligible(&items) {
            result.message = format!(
                "Quantidade total de itens ({}) não atingiu o mínimo necessário ({})",
                quantity,
                self.gate.minimum_quantity()
            );
            tracing::info!(reseller_id = %reseller.id, "{}", result.message);
            return Some(result);
        }

        let mut supplier_order = SupplierOrder::new(&reseller, items);
        let outcome = self.pipeline.submit(&supplier_order).await;
        supplier_order.record_outcome(&outcome);

        let contributing = supplier_order.contributing_order_ids();
        let changed = apply_outcome(&mut reseller, &contributing, &outcome);
        tracing::debug!(
            reseller_id = %reseller.id,
            supplier_order_id = %supplier_order.id,
            "{} pedidos tiveram o status atualizado ({} em Erro na revenda)",
            changed,
            count_with_status(&reseller, OrderStatus::Erro)
        );

        // O histórico é só auditoria: se não gravar, o ID não é informado.
        match self.supplier_orders.put_supplier_order(&supplier_order).await {
            Ok(()) => result.supplier_order_id = Some(supplier_order.id),
            Err(e) => tracing::error!(
                reseller_id = %reseller.id,
                supplier_order_id = %supplier_order.id,
                "Falha ao gravar o pedido à fornecedora: {:?}",
                e
            ),
        }
        result.order_number = supplier_order.confirmation_number.clone();
        result.message = outcome.message();
        result.status = if outcome.is_accepted() {
            ProcessingStatus::Processado
        } else {
            ProcessingStatus::Erro
        };

        // Se a gravação falhar, os pedidos continuam pendentes no banco e
        // serão reenviados na próxima rodada.
        if let Err(e) = self.store.put_reseller(&reseller).await {
            tracing::error!(
                reseller_id = %reseller.id,
                supplier_order_id = %supplier_order.id,
                "Falha ao gravar status dos pedidos: {:?}",
                e
            );
            result.status = ProcessingStatus::Erro;
            result.message = format!(
                "{}. Falha ao gravar o status dos pedidos; eles serão reprocessados.",
                result.message
            );
        }

        Some(result)
    }
}
