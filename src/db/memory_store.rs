// src/db/memory_store.rs

use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    reseller_repo::{ResellerPage, ResellerStore},
    supplier_order_repo::SupplierOrderStore,
};
use crate::{
    common::error::AppError,
    models::{reseller::Reseller, supplier::SupplierOrder},
};

// Armazenamento em memória (STORE_BACKEND=memory e testes).
// O BTreeMap mantém a mesma ordem por ID que o Postgres usa na paginação.
#[derive(Default)]
pub struct InMemoryResellerStore {
    resellers: RwLock<BTreeMap<Uuid, Reseller>>,
}

impl InMemoryResellerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resellers(resellers: impl IntoIterator<Item = Reseller>) -> Self {
        Self {
            resellers: RwLock::new(resellers.into_iter().map(|r| (r.id, r)).collect()),
        }
    }
}

#[async_trait]
impl ResellerStore for InMemoryResellerStore {
    async fn get_reseller(&self, id: Uuid) -> Result<Option<Reseller>, AppError> {
        Ok(self.resellers.read().await.get(&id).cloned())
    }

    async fn put_reseller(&self, reseller: &Reseller) -> Result<(), AppError> {
        self.resellers
            .write()
            .await
            .insert(reseller.id, reseller.clone());
        Ok(())
    }

    async fn delete_reseller(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.resellers.write().await.remove(&id).is_some())
    }

    async fn list_resellers(
        &self,
        limit: i64,
        after: Option<Uuid>,
    ) -> Result<ResellerPage, AppError> {
        let take = usize::try_from(limit).unwrap_or(0);
        let lower = match after {
            Some(id) => Bound::Excluded(id),
            None => Bound::Unbounded,
        };

        let resellers = self
            .resellers
            .read()
            .await
            .range((lower, Bound::Unbounded))
            .take(take)
            .map(|(_, r)| r.clone())
            .collect();

        Ok(ResellerPage::from_batch(resellers, limit))
    }
}

#[derive(Default)]
pub struct InMemorySupplierOrderStore {
    orders: RwLock<BTreeMap<Uuid, SupplierOrder>>,
}

impl InMemorySupplierOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SupplierOrderStore for InMemorySupplierOrderStore {
    async fn put_supplier_order(&self, order: &SupplierOrder) -> Result<(), AppError> {
        self.orders.write().await.insert(order.id, order.clone());
        Ok(())
    }

    async fn get_supplier_order(&self, id: Uuid) -> Result<Option<SupplierOrder>, AppError> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn list_supplier_orders(
        &self,
        reseller_id: Uuid,
    ) -> Result<Vec<SupplierOrder>, AppError> {
        let mut orders: Vec<_> = self
            .orders
            .read()
            .await
            .values()
            .filter(|o| o.reseller_id == reseller_id)
            .cloned()
            .collect();
        orders.sort_by_key(|o| (o.created_at, o.id));
        Ok(orders)
    }
}
