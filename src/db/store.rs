// src/db/store.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::{
        catalog::{Brand, Category, NewProduct, NewProductBarcode, NewProductSupplier, Product,
                  ProductBarcode, ProductSupplier},
        inventory::{NewStockItem, StockItem, Warehouse},
    },
};

// ---
// A "porta" do importador para o banco.
// ---
// O pipeline de importação só enxerga este trait. Em produção a
// implementação é o CatalogRepository (sqlx/Postgres); nos testes de
// integração entra uma implementação em memória.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // Caches de lote: carregados UMA vez antes do loop de linhas.
    async fn first_category(&self) -> Result<Option<Category>, AppError>;
    async fn first_warehouse(&self) -> Result<Option<Warehouse>, AppError>;
    async fn list_brands(&self) -> Result<Vec<Brand>, AppError>;

    // Consultas "vivas": feitas linha a linha, enxergam o que as linhas
    // anteriores do mesmo lote já gravaram.
    async fn find_category_containing(&self, fragment: &str) -> Result<Option<Category>, AppError>;
    async fn identifier_exists(&self, code: &str) -> Result<bool, AppError>;
    async fn barcode_exists(&self, barcode: &str) -> Result<bool, AppError>;

    async fn create_brand(&self, name: &str, auto_created: bool) -> Result<Brand, AppError>;

    // Escritas do lote: cada uma é um insert independente, sem transação
    // englobando a linha.
    async fn insert_product(&self, new_product: NewProduct) -> Result<Product, AppError>;
    async fn insert_stock_item(&self, new_item: NewStockItem) -> Result<StockItem, AppError>;
    async fn insert_product_supplier(
        &self,
        new_supplier: NewProductSupplier,
    ) -> Result<ProductSupplier, AppError>;
    async fn insert_product_barcode(
        &self,
        new_barcode: NewProductBarcode,
    ) -> Result<ProductBarcode, AppError>;
}
