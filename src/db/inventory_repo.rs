// src/db/inventory_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::inventory::{StockItem, Warehouse},
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cria um novo depósito.
    pub async fn create_warehouse(
        &self,
        name: &str,
        code: Option<&str>,
    ) -> Result<Warehouse, AppError> {
        sqlx::query_as::<_, Warehouse>(
            r#"
            INSERT INTO warehouses (name, code)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::WarehouseNameAlreadyExists(name.to_string());
                }
            }
            e.into()
        })
    }

    pub async fn list_warehouses(&self) -> Result<Vec<Warehouse>, AppError> {
        let warehouses =
            sqlx::query_as::<_, Warehouse>("SELECT * FROM warehouses ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(warehouses)
    }

    pub async fn list_stock(&self) -> Result<Vec<StockItem>, AppError> {
        let stock =
            sqlx::query_as::<_, StockItem>("SELECT * FROM stock_items ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(stock)
    }
}
