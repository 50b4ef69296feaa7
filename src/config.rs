// src/config.rs

use std::sync::Arc;
use std::{env, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{CatalogRepository, InventoryRepository},
    services::{CatalogService, ImportService, InventoryService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub catalog_service: CatalogService,
    pub inventory_service: InventoryService,
    pub import_service: ImportService<CatalogRepository>,
}

impl AppState {
    // A assinatura retorna um Result: se a configuração falhar, quem decide
    // o que fazer é o main.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());

        let catalog_service = CatalogService::new(catalog_repo.clone());
        let inventory_service = InventoryService::new(inventory_repo);
        // O importador só conhece a "porta" CatalogStore; aqui ela é o
        // repositório Postgres.
        let import_service = ImportService::new(Arc::new(catalog_repo));

        Ok(Self {
            db_pool,
            catalog_service,
            inventory_service,
            import_service,
        })
    }
}
