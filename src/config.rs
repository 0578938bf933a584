// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::{bail, Context};
use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{
        InMemoryResellerStore, InMemorySupplierOrderStore, PgResellerRepository,
        PgSupplierOrderRepository, ResellerStore, SupplierOrderStore,
    },
    services::{
        aggregation::ThresholdGate,
        partner_client::{FakePartnerClient, HttpPartnerClient, PartnerClient},
        submission::SubmissionPipeline,
        ProcessingService, ResellerService,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => bail!("STORE_BACKEND inválido: '{}' (use 'postgres' ou 'memory')", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnerMode {
    Http,
    Fake,
}

impl FromStr for PartnerMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(PartnerMode::Http),
            "fake" => Ok(PartnerMode::Fake),
            other => bail!("PARTNER_MODE inválido: '{}' (use 'http' ou 'fake')", other),
        }
    }
}

// Configuração explícita: nada de variáveis globais espalhadas pelo código.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub partner_mode: PartnerMode,
    pub partner_api_url: String,
    pub partner_timeout: Duration,
    pub min_order_quantity: u64,
    pub page_size: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            store_backend: StoreBackend::Postgres,
            database_url: None,
            partner_mode: PartnerMode::Http,
            partner_api_url: "https://api.fornecedora.example/pedidos".to_string(),
            partner_timeout: Duration::from_secs(30),
            min_order_quantity: 1000,
            page_size: 20,
        }
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de busca (testável sem mexer no ambiente).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let store_backend = match lookup("STORE_BACKEND") {
            Some(value) => value.parse()?,
            None => defaults.store_backend,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL deve ser definida quando STORE_BACKEND=postgres");
        }

        let partner_mode = match lookup("PARTNER_MODE") {
            Some(value) => value.parse()?,
            None => defaults.partner_mode,
        };

        let timeout_secs: u64 = parse_or(
            &lookup,
            "PARTNER_TIMEOUT_SECS",
            defaults.partner_timeout.as_secs(),
        )?;
        if timeout_secs == 0 {
            bail!("PARTNER_TIMEOUT_SECS deve ser maior que zero");
        }

        let page_size: i64 = parse_or(&lookup, "LIST_PAGE_SIZE", defaults.page_size)?;
        if page_size <= 0 {
            bail!("LIST_PAGE_SIZE deve ser maior que zero");
        }

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            store_backend,
            database_url,
            partner_mode,
            partner_api_url: lookup("PARTNER_API_URL").unwrap_or(defaults.partner_api_url),
            partner_timeout: Duration::from_secs(timeout_secs),
            min_order_quantity: parse_or(
                &lookup,
                "MIN_ORDER_QUANTITY",
                defaults.min_order_quantity,
            )?,
            page_size,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} inválido: '{}'", key, raw)),
        None => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub reseller_service: ResellerService,
    pub processing_service: ProcessingService,
}

impl AppState {
    pub async fn new(settings: Settings) -> anyhow::Result<Self> {
        let (store, supplier_orders) = match settings.store_backend {
            StoreBackend::Postgres => {
                let database_url = settings
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL deve ser definida")?;

                let db_pool = PgPoolOptions::new()
                    .max_connections(5)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await
                    .context("Falha ao conectar ao banco de dados")?;
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                sqlx::migrate!()
                    .run(&db_pool)
                    .await
                    .context("Falha ao rodar as migrações do banco de dados")?;
                tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

                let store: Arc<dyn ResellerStore> =
                    Arc::new(PgResellerRepository::new(db_pool.clone()));
                let supplier_orders: Arc<dyn SupplierOrderStore> =
                    Arc::new(PgSupplierOrderRepository::new(db_pool));
                (store, supplier_orders)
            }
            StoreBackend::Memory => {
                tracing::warn!("Usando armazenamento em memória: os dados se perdem ao reiniciar");
                let store: Arc<dyn ResellerStore> = Arc::new(InMemoryResellerStore::new());
                let supplier_orders: Arc<dyn SupplierOrderStore> =
                    Arc::new(InMemorySupplierOrderStore::new());
                (store, supplier_orders)
            }
        };

        let partner: Arc<dyn PartnerClient> = match settings.partner_mode {
            PartnerMode::Http => Arc::new(
                HttpPartnerClient::new(settings.partner_api_url.clone(), settings.partner_timeout)
                    .context("Falha ao criar o cliente HTTP da fornecedora")?,
            ),
            PartnerMode::Fake => {
                tracing::warn!("PARTNER_MODE=fake: pedidos não serão enviados à fornecedora real");
                Arc::new(FakePartnerClient::accepting())
            }
        };

        Ok(Self::from_parts(settings, store, supplier_orders, partner))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_parts(
        settings: Settings,
        store: Arc<dyn ResellerStore>,
        supplier_orders: Arc<dyn SupplierOrderStore>,
        partner: Arc<dyn PartnerClient>,
    ) -> Self {
        let pipeline = SubmissionPipeline::new(partner, settings.partner_timeout);
        let gate = ThresholdGate::new(settings.min_order_quantity);

        let reseller_service = ResellerService::new(store.clone(), settings.page_size);
        let processing_service = ProcessingService::new(
            store,
            supplier_orders,
            pipeline,
            gate,
            settings.page_size,
        );

        Self {
            settings,
            reseller_service,
            processing_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_database_is_configured() {
        let settings = Settings::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/revendas",
        )]))
        .unwrap();

        assert_eq!(settings.store_backend, StoreBackend::Postgres);
        assert_eq!(settings.partner_mode, PartnerMode::Http);
        assert_eq!(settings.partner_timeout, Duration::from_secs(30));
        assert_eq!(settings.min_order_quantity, 1000);
        assert_eq!(settings.page_size, 20);
        assert_eq!(settings.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn memory_backend_does_not_need_a_database() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("PARTNER_MODE", "fake"),
            ("PARTNER_TIMEOUT_SECS", "5"),
            ("MIN_ORDER_QUANTITY", "250"),
            ("LIST_PAGE_SIZE", "100"),
        ]))
        .unwrap();

        assert_eq!(settings.store_backend, StoreBackend::Memory);
        assert!(settings.database_url.is_none());
        assert_eq!(settings.partner_mode, PartnerMode::Fake);
        assert_eq!(settings.partner_timeout, Duration::from_secs(5));
        assert_eq!(settings.min_order_quantity, 250);
        assert_eq!(settings.page_size, 100);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(Settings::from_lookup(lookup_from(&[])).is_err());
        assert!(Settings::from_lookup(lookup_from(&[("STORE_BACKEND", "dynamo")])).is_err());
        assert!(Settings::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("PARTNER_TIMEOUT_SECS", "0"),
        ]))
        .is_err());
        assert!(Settings::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("MIN_ORDER_QUANTITY", "mil"),
        ]))
        .is_err());
        assert!(Settings::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("LIST_PAGE_SIZE", "-1"),
        ]))
        .is_err());
    }
}
