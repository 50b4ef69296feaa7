// src/services/catalog_service.rs

use crate::{
    common::error::AppError,
    db::{CatalogRepository, CatalogStore},
    models::catalog::{Brand, Category, Product},
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    // --- Categorias ---

    pub async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, AppError> {
        self.repo.create_category(name, description).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.repo.list_categories().await
    }

    // --- Marcas ---

    // Marca criada pela API não leva a etiqueta auto_created: ela só marca
    // as marcas que o importador inventou sozinho.
    pub async fn create_brand(&self, name: &str) -> Result<Brand, AppError> {
        self.repo.create_brand(name, false).await
    }

    pub async fn list_brands(&self) -> Result<Vec<Brand>, AppError> {
        self.repo.list_brands().await
    }

    // --- Produtos ---

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.repo.list_products().await
    }
}
