// src/db/catalog_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::store::CatalogStore,
    models::{
        catalog::{Brand, Category, NewProduct, NewProductBarcode, NewProductSupplier, Product,
                  ProductBarcode, ProductSupplier},
        inventory::{NewStockItem, StockItem, Warehouse},
    },
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(categories)
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    // ---
    // Funções de "Escrita" (CRUD manual do catálogo)
    // ---

    /// Cria uma nova categoria.
    pub async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::CategoryNameAlreadyExists(name.to_string());
                }
            }
            e.into()
        })
    }
}

// ---
// A implementação Postgres da "porta" do importador.
// ---
#[async_trait]
impl CatalogStore for CatalogRepository {
    // "Primeira categoria na ordem natural da tabela" = categoria padrão
    // do lote.
    async fn first_category(&self) -> Result<Option<Category>, AppError> {
        let category =
            sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY created_at ASC LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;
        Ok(category)
    }

    async fn first_warehouse(&self) -> Result<Option<Warehouse>, AppError> {
        let warehouse =
            sqlx::query_as::<_, Warehouse>("SELECT * FROM warehouses ORDER BY created_at ASC LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;
        Ok(warehouse)
    }

    async fn list_brands(&self) -> Result<Vec<Brand>, AppError> {
        let brands = sqlx::query_as::<_, Brand>("SELECT * FROM brands ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(brands)
    }

    async fn find_category_containing(
        &self,
        fragment: &str,
    ) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT * FROM categories
            WHERE name ILIKE '%' || $1 || '%'
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(fragment)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    // O identificador humano é único entre produtos E serviços: o mesmo
    // código não pode ser sku de um e service_code de outro.
    async fn identifier_exists(&self, code: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM products WHERE sku = $1 OR service_code = $1)",
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn barcode_exists(&self, barcode: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM products WHERE barcode = $1)",
        )
        .bind(barcode)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn create_brand(&self, name: &str, auto_created: bool) -> Result<Brand, AppError> {
        sqlx::query_as::<_, Brand>(
            r#"
            INSERT INTO brands (name, auto_created)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(auto_created)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::BrandNameAlreadyExists(name.to_string());
                }
            }
            e.into()
        })
    }

    async fn insert_product(&self, new_product: NewProduct) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (
                kind, sku, service_code, name, description,
                barcode, barcode_type, category_id, brand_id,
                price, cost, original_price, original_cost,
                import_currency, selling_currency,
                uom_base, uom_sell, duration_hours, active
            )
            VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8, $9,
                $10, $11, $12, $13,
                $14, $15,
                $16, $17, $18, $19
            )
            RETURNING *
            "#,
        )
        .bind(new_product.kind)
        .bind(&new_product.sku)
        .bind(&new_product.service_code)
        .bind(&new_product.name)
        .bind(&new_product.description)
        .bind(&new_product.barcode)
        .bind(&new_product.barcode_type)
        .bind(new_product.category_id)
        .bind(new_product.brand_id)
        .bind(new_product.price)
        .bind(new_product.cost)
        .bind(new_product.original_price)
        .bind(new_product.original_cost)
        .bind(&new_product.import_currency)
        .bind(&new_product.selling_currency)
        .bind(&new_product.uom_base)
        .bind(&new_product.uom_sell)
        .bind(new_product.duration_hours)
        .bind(new_product.active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    let constraint = db_err.constraint().unwrap_or_default().to_string();
                    return AppError::UniqueConstraintViolation(constraint);
                }
            }
            e.into()
        })
    }

    async fn insert_stock_item(&self, new_item: NewStockItem) -> Result<StockItem, AppError> {
        let item = sqlx::query_as::<_, StockItem>(
            r#"
            INSERT INTO stock_items (
                product_id, warehouse_id, quantity, reserved,
                available, average_cost, total_value, reorder_point
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(new_item.product_id)
        .bind(new_item.warehouse_id)
        .bind(new_item.quantity)
        .bind(new_item.reserved)
        .bind(new_item.available)
        .bind(new_item.average_cost)
        .bind(new_item.total_value)
        .bind(new_item.reorder_point)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    async fn insert_product_supplier(
        &self,
        new_supplier: NewProductSupplier,
    ) -> Result<ProductSupplier, AppError> {
        let supplier = sqlx::query_as::<_, ProductSupplier>(
            r#"
            INSERT INTO product_suppliers (
                product_id, supplier_name, supplier_sku, supplier_barcode, supplier_cost
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(new_supplier.product_id)
        .bind(&new_supplier.supplier_name)
        .bind(&new_supplier.supplier_sku)
        .bind(&new_supplier.supplier_barcode)
        .bind(new_supplier.supplier_cost)
        .fetch_one(&self.pool)
        .await?;
        Ok(supplier)
    }

    async fn insert_product_barcode(
        &self,
        new_barcode: NewProductBarcode,
    ) -> Result<ProductBarcode, AppError> {
        let barcode = sqlx::query_as::<_, ProductBarcode>(
            r#"
            INSERT INTO product_barcodes (product_id, barcode, barcode_type, is_primary)
            VALUES ($1, $2, $3, FALSE)
            RETURNING *
            "#,
        )
        .bind(new_barcode.product_id)
        .bind(&new_barcode.barcode)
        .bind(&new_barcode.barcode_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(barcode)
    }
}
