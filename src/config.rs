// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{BrokerRepository, CatalogRepository, PriceTableRepository, QuoteRepository},
    services::{
        auth::AuthService, broker_service::BrokerService, catalog_service::CatalogService,
        pricing_service::PricingService, quote_service::QuoteService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub broker_service: BrokerService,
    pub catalog_service: CatalogService,
    pub pricing_service: PricingService,
    pub quote_service: QuoteService,
}

impl AppState {
    // Carrega as configurações do ambiente e monta o grafo de dependências.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o grafo de dependências ---
        let broker_repo = BrokerRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let price_repo = PriceTableRepository::new(db_pool.clone());
        let quote_repo = QuoteRepository::new(db_pool.clone());

        let auth_service = AuthService::new(broker_repo.clone(), jwt_secret);
        let broker_service = BrokerService::new(broker_repo);
        let catalog_service = CatalogService::new(catalog_repo);
        let pricing_service = PricingService::new(price_repo.clone());
        let quote_service = QuoteService::new(quote_repo, price_repo, db_pool.clone());

        Ok(Self {
            db_pool,
            auth_service,
            broker_service,
            catalog_service,
            pricing_service,
            quote_service,
        })
    }
}
