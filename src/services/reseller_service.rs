// src/services/reseller_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ResellerStore,
    models::{
        order::{ClientOrder, LineItem},
        reseller::{Client, NewClient, NewReseller, Reseller},
    },
};

#[derive(Clone)]
pub struct ResellerService {
    store: Arc<dyn ResellerStore>,
    page_size: i64,
}

impl ResellerService {
    pub fn new(store: Arc<dyn ResellerStore>, page_size: i64) -> Self {
        Self { store, page_size }
    }

    // =========================================================================
    //  REVENDAS
    // =========================================================================

    pub async fn register_reseller(&self, input: NewReseller) -> Result<Reseller, AppError> {
        // Um ID informado que já existe sobrescreveria clientes e pedidos.
        if let Some(id) = input.id {
            if self.store.get_reseller(id).await?.is_some() {
                return Err(AppError::ResellerAlreadyExists(id));
            }
        }

        let reseller = input.into_reseller();
        self.store.put_reseller(&reseller).await?;

        tracing::info!(
            reseller_id = %reseller.id,
            "Revenda cadastrada: {}",
            reseller.corporate_name
        );
        Ok(reseller)
    }

    pub async fn get_reseller(&self, id: Uuid) -> Result<Reseller, AppError> {
        self.store
            .get_reseller(id)
            .await?
            .ok_or(AppError::ResellerNotFound(id))
    }

    pub async fn list_resellers(&self) -> Result<Vec<Reseller>, AppError> {
        self.store.list_all_resellers(self.page_size).await
    }

    pub async fn delete_reseller(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_reseller(id).await? {
            return Err(AppError::ResellerNotFound(id));
        }
        tracing::info!(reseller_id = %id, "Revenda removida");
        Ok(())
    }

    // =========================================================================
    //  CLIENTES
    // =========================================================================

    pub async fn register_client(
        &self,
        reseller_id: Uuid,
        input: NewClient,
    ) -> Result<Client, AppError> {
        let mut reseller = self.get_reseller(reseller_id).await?;

        if let Some(id) = input.id {
            if reseller.clients.iter().any(|c| c.id == id) {
                return Err(AppError::ClientAlreadyExists(id));
            }
        }

        let client = input.into_client();
        reseller.clients.push(client.clone());
        self.store.put_reseller(&reseller).await?;

        tracing::info!(reseller_id = %reseller_id, client_id = %client.id, "Cliente cadastrado");
        Ok(client)
    }

    // =========================================================================
    //  PEDIDOS
    // =========================================================================

    pub async fn register_order(
        &self,
        reseller_id: Uuid,
        client_id: Uuid,
        items: Vec<LineItem>,
        notes: Option<String>,
    ) -> Result<ClientOrder, AppError> {
        if items.is_empty() {
            return Err(AppError::InvalidInput(
                "O pedido deve conter pelo menos um item".to_string(),
            ));
        }

        let mut reseller = self.get_reseller(reseller_id).await?;
        let client = reseller
            .find_client_mut(client_id)
            .ok_or(AppError::ClientNotFound(client_id))?;

        let notes = notes.filter(|n| !n.trim().is_empty());
        let order = ClientOrder::new(client.id, items, notes)?;
        client.orders.push(order.clone());

        self.store.put_reseller(&reseller).await?;

        tracing::info!(
            reseller_id = %reseller_id,
            client_id = %client_id,
            order_id = %order.id,
            "Pedido cadastrado com {} itens ({} unidades), total {}",
            order.items.len(),
            order.total_quantity(),
            order.total_value
        );
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::InMemoryResellerStore, models::order::OrderStatus};
    use rust_decimal_macros::dec;

    fn new_reseller(id: Option<Uuid>) -> NewReseller {
        NewReseller {
            id,
            cnpj: "12345678000195".into(),
            corporate_name: "Empresa Exemplo Ltda".into(),
            trade_name: "Exemplo".into(),
            email: "contato@exemplo.com.br".into(),
            phones: vec![],
            contacts: vec![],
            addresses: vec![],
        }
    }

    fn new_client() -> NewClient {
        NewClient {
            id: None,
            document: "12345678909".into(),
            name: "Bar do Zé".into(),
            email: None,
            phone: None,
            address: None,
        }
    }

    fn service() -> ResellerService {
        ResellerService::new(Arc::new(InMemoryResellerStore::new()), 20)
    }

    #[tokio::test]
    async fn registering_with_an_existing_id_is_a_conflict() {
        let service = service();
        let id = Uuid::new_v4();

        let reseller = service.register_reseller(new_reseller(Some(id))).await.unwrap();
        assert_eq!(reseller.id, id);

        let err = service.register_reseller(new_reseller(Some(id))).await.unwrap_err();
        assert!(matches!(err, AppError::ResellerAlreadyExists(found) if found == id));
    }

    #[tokio::test]
    async fn order_is_appended_to_the_client_and_persisted() {
        let service = service();
        let reseller = service.register_reseller(new_reseller(None)).await.unwrap();
        let client = service.register_client(reseller.id, new_client()).await.unwrap();

        let order = service
            .register_order(
                reseller.id,
                client.id,
                vec![LineItem {
                    product: "IPA".into(),
                    product_name: None,
                    quantity: 30,
                    unit_price: dec!(18.50),
                }],
                Some("   ".into()),
            )
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Novo);
        assert_eq!(order.total_value, dec!(555.00));
        assert!(order.notes.is_none());

        let stored = service.get_reseller(reseller.id).await.unwrap();
        assert_eq!(stored.clients[0].orders, vec![order]);
    }

    #[tokio::test]
    async fn order_requires_items_and_known_ids() {
        let service = service();
        let reseller = service.register_reseller(new_reseller(None)).await.unwrap();
        let client = service.register_client(reseller.id, new_client()).await.unwrap();
        let item = LineItem {
            product: "IPA".into(),
            product_name: None,
            quantity: 1,
            unit_price: dec!(1),
        };

        assert!(matches!(
            service.register_order(reseller.id, client.id, vec![], None).await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            service.register_order(Uuid::new_v4(), client.id, vec![item.clone()], None).await,
            Err(AppError::ResellerNotFound(_))
        ));
        assert!(matches!(
            service.register_order(reseller.id, Uuid::new_v4(), vec![item], None).await,
            Err(AppError::ClientNotFound(_))
        ));
    }

    #[tokio::test]
    async fn order_whose_total_overflows_is_rejected_and_not_stored() {
        let service = service();
        let reseller = service.register_reseller(new_reseller(None)).await.unwrap();
        let client = service.register_client(reseller.id, new_client()).await.unwrap();
        let item = LineItem {
            product: "IPA".into(),
            product_name: None,
            quantity: 4_000_000_000,
            unit_price: dec!(100000000000000000000),
        };

        assert!(matches!(
            service.register_order(reseller.id, client.id, vec![item], None).await,
            Err(AppError::InvalidInput(_))
        ));
        let stored = service.get_reseller(reseller.id).await.unwrap();
        assert!(stored.clients[0].orders.is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_reseller_is_not_found() {
        let service = service();
        let reseller = service.register_reseller(new_reseller(None)).await.unwrap();

        service.delete_reseller(reseller.id).await.unwrap();
        assert!(matches!(
            service.delete_reseller(reseller.id).await,
            Err(AppError::ResellerNotFound(_))
        ));
        assert!(service.list_resellers().await.unwrap().is_empty());
    }
}
