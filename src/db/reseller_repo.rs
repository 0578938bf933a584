// src/db/reseller_repo.rs

use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{common::error::AppError, models::reseller::Reseller};

/// Uma página da varredura de revendas, ordenada por ID.
#[derive(Debug, Clone, Default)]
pub struct ResellerPage {
    pub resellers: Vec<Reseller>,
    // Presente quando a página veio cheia; continue a partir dele.
    pub next_cursor: Option<Uuid>,
}

impl ResellerPage {
    pub fn from_batch(resellers: Vec<Reseller>, limit: i64) -> Self {
        let next_cursor = if limit > 0 && resellers.len() as i64 >= limit {
            resellers.last().map(|r| r.id)
        } else {
            None
        };
        Self { resellers, next_cursor }
    }
}

/// Armazenamento de revendas: o documento inteiro (clientes e pedidos
/// embutidos) é a unidade de leitura e escrita.
///
/// Não há controle de concorrência: duas rodadas simultâneas sobre a mesma
/// revenda seguem "last writer wins".
#[async_trait]
pub trait ResellerStore: Send + Sync {
    async fn get_reseller(&self, id: Uuid) -> Result<Option<Reseller>, AppError>;

    /// Upsert do documento completo.
    async fn put_reseller(&self, reseller: &Reseller) -> Result<(), AppError>;

    /// Retorna `false` se a revenda não existia.
    async fn delete_reseller(&self, id: Uuid) -> Result<bool, AppError>;

    async fn list_resellers(
        &self,
        limit: i64,
        after: Option<Uuid>,
    ) -> Result<ResellerPage, AppError>;

    /// Segue os cursores até o fim da tabela.
    async fn list_all_resellers(&self, page_size: i64) -> Result<Vec<Reseller>, AppError> {
        if page_size <= 0 {
            return Err(AppError::InvalidInput(
                "O tamanho da página deve ser maior que zero".to_string(),
            ));
        }

        let mut all = Vec::new();
        let mut cursor = None;
        loop {
            let page = self.list_resellers(page_size, cursor).await?;
            all.extend(page.resellers);
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        Ok(all)
    }
}

// O repositório de revendas no Postgres: uma linha por revenda, documento em JSONB.
#[derive(Clone)]
pub struct PgResellerRepository {
    pool: PgPool,
}

impl PgResellerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResellerStore for PgResellerRepository {
    async fn get_reseller(&self, id: Uuid) -> Result<Option<Reseller>, AppError> {
        let document = sqlx::query_scalar::<_, Json<Reseller>>(
            "SELECT document FROM resellers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document.map(|Json(reseller)| reseller))
    }

    async fn put_reseller(&self, reseller: &Reseller) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO resellers (id, document)
            VALUES ($1, $2)
            ON CONFLICT (id)
            DO UPDATE SET
                document = EXCLUDED.document,
                updated_at = NOW()
            "#,
        )
        .bind(reseller.id)
        .bind(Json(reseller))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_reseller(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resellers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_resellers(
        &self,
        limit: i64,
        after: Option<Uuid>,
    ) -> Result<ResellerPage, AppError> {
        let documents = sqlx::query_scalar::<_, Json<Reseller>>(
            r#"
            SELECT document FROM resellers
            WHERE ($1::uuid IS NULL OR id > $1)
            ORDER BY id
            LIMIT $2
            "#,
        )
        .bind(after)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let resellers = documents.into_iter().map(|Json(r)| r).collect();
        Ok(ResellerPage::from_batch(resellers, limit))
    }
}
