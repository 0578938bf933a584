// src/services/partner_client.rs

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::supplier::SupplierOrder;

/// Falha ao enviar um pedido consolidado à fornecedora.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartnerError {
    #[error("pedido recusado: {0}")]
    Rejected(String),
    #[error("falha de comunicação: {0}")]
    Transport(String),
}

/// A API da fornecedora. Retorna o número de pedido emitido por ela.
#[async_trait]
pub trait PartnerClient: Send + Sync {
    async fn submit_order(&self, order: &SupplierOrder) -> Result<String, PartnerError>;
}

// --- Cliente HTTP ---

// O preço unitário não vai no payload: a fornecedora usa a própria tabela.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PartnerOrderRequest<'a> {
    reseller_id: Uuid,
    cnpj: &'a str,
    corporate_name: &'a str,
    items: Vec<PartnerOrderItem<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PartnerOrderItem<'a> {
    product: &'a str,
    quantity: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartnerOrderResponse {
    #[serde(default, alias = "numeroPedido")]
    order_number: Option<String>,
}

pub struct HttpPartnerClient {
    client: Client,
    url: String,
}

impl HttpPartnerClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PartnerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PartnerError::Transport(e.to_string()))?;

        Ok(Self { client, url: url.into() })
    }
}

#[async_trait]
impl PartnerClient for HttpPartnerClient {
    async fn submit_order(&self, order: &SupplierOrder) -> Result<String, PartnerError> {
        let request = PartnerOrderRequest {
            reseller_id: order.reseller_id,
            cnpj: &order.reseller_cnpj,
            corporate_name: &order.corporate_name,
            items: order
                .items
                .iter()
                .map(|i| PartnerOrderItem { product: &i.product, quantity: i.quantity })
                .collect(),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| PartnerError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PartnerError::Rejected(format!("HTTP {}: {}", status, body.trim())));
        }

        let body: PartnerOrderResponse = response
            .json()
            .await
            .map_err(|e| PartnerError::Transport(format!("resposta inválida: {}", e)))?;

        match body.order_number {
            Some(number) if !number.trim().is_empty() => Ok(number),
            _ => Err(PartnerError::Transport(
                "resposta sem número de pedido".to_string(),
            )),
        }
    }
}

// --- Fornecedora fake (determinística) ---

/// Devolve os resultados roteirizados em ordem; quando o roteiro acaba,
/// aceita tudo com números sequenciais (`FAKE-00001`, ...).
#[derive(Default)]
pub struct FakePartnerClient {
    script: Mutex<VecDeque<Result<String, PartnerError>>>,
    submitted: Mutex<Vec<SupplierOrder>>,
    sequence: AtomicU64,
    delay: Option<Duration>,
}

impl FakePartnerClient {
    pub fn accepting() -> Self {
        Self::default()
    }

    pub fn scripted(results: impl IntoIterator<Item = Result<String, PartnerError>>) -> Self {
        Self {
            script: Mutex::new(results.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Pedidos recebidos até agora, na ordem de chegada.
    pub fn submitted(&self) -> Vec<SupplierOrder> {
        self.submitted
            .lock()
            .map(|orders| orders.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PartnerClient for FakePartnerClient {
    async fn submit_order(&self, order: &SupplierOrder) -> Result<String, PartnerError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Ok(mut submitted) = self.submitted.lock() {
            submitted.push(order.clone());
        }

        let scripted = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front());

        let result = scripted.unwrap_or_else(|| {
            let n = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
            Ok(format!("FAKE-{:05}", n))
        });

        match &result {
            Ok(number) => tracing::info!("[FAKE] Pedido {} aceito. Número: {}", order.id, number),
            Err(e) => tracing::warn!("[FAKE] Pedido {} não enviado: {}", order.id, e),
        }
        result
    }
}
