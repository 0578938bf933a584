// src/db/supplier_order_repo.rs

use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{common::error::AppError, models::supplier::SupplierOrder};

/// Histórico dos pedidos consolidados, gravados com o status final do envio.
#[async_trait]
pub trait SupplierOrderStore: Send + Sync {
    async fn put_supplier_order(&self, order: &SupplierOrder) -> Result<(), AppError>;

    async fn get_supplier_order(&self, id: Uuid) -> Result<Option<SupplierOrder>, AppError>;

    /// Mais antigos primeiro.
    async fn list_supplier_orders(
        &self,
        reseller_id: Uuid,
    ) -> Result<Vec<SupplierOrder>, AppError>;
}

#[derive(Clone)]
pub struct PgSupplierOrderRepository {
    pool: PgPool,
}

impl PgSupplierOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SupplierOrderStore for PgSupplierOrderRepository {
    async fn put_supplier_order(&self, order: &SupplierOrder) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO supplier_orders (id, reseller_id, document, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id)
            DO UPDATE SET
                document = EXCLUDED.document,
                updated_at = NOW()
            "#,
        )
        .bind(order.id)
        .bind(order.reseller_id)
        .bind(Json(order))
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_supplier_order(&self, id: Uuid) -> Result<Option<SupplierOrder>, AppError> {
        let document = sqlx::query_scalar::<_, Json<SupplierOrder>>(
            "SELECT document FROM supplier_orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document.map(|Json(order)| order))
    }

    async fn list_supplier_orders(
        &self,
        reseller_id: Uuid,
    ) -> Result<Vec<SupplierOrder>, AppError> {
        let documents = sqlx::query_scalar::<_, Json<SupplierOrder>>(
            r#"
            SELECT document FROM supplier_orders
            WHERE reseller_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(reseller_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents.into_iter().map(|Json(order)| order).collect())
    }
}
