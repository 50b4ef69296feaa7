// src/services/inventory_service.rs

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::inventory::{StockItem, Warehouse},
};

#[derive(Clone)]
pub struct InventoryService {
    repo: InventoryRepository,
}

impl InventoryService {
    pub fn new(repo: InventoryRepository) -> Self {
        Self { repo }
    }

    pub async fn create_warehouse(
        &self,
        name: &str,
        code: Option<&str>,
    ) -> Result<Warehouse, AppError> {
        self.repo.create_warehouse(name, code).await
    }

    pub async fn list_warehouses(&self) -> Result<Vec<Warehouse>, AppError> {
        self.repo.list_warehouses().await
    }

    pub async fn list_stock(&self) -> Result<Vec<StockItem>, AppError> {
        self.repo.list_stock().await
    }
}
