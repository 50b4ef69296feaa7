// tests/common/mod.rs

// Implementação em memória da "porta" CatalogStore, para exercitar o
// pipeline de importação sem banco de dados. O comportamento imita o
// repositório Postgres: ordem natural = ordem de inserção, unicidade de
// sku/service_code/barcode, busca de categoria por "contém".

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use catalogo_backend::{
    common::error::AppError,
    db::CatalogStore,
    models::{
        catalog::{Brand, Category, NewProduct, NewProductBarcode, NewProductSupplier, Product,
                  ProductBarcode, ProductKind, ProductSupplier},
        inventory::{NewStockItem, StockItem, Warehouse},
    },
};

#[derive(Default)]
pub struct CatalogState {
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
    pub warehouses: Vec<Warehouse>,
    pub products: Vec<Product>,
    pub stock_items: Vec<StockItem>,
    pub suppliers: Vec<ProductSupplier>,
    pub barcodes: Vec<ProductBarcode>,

    // Liga a simulação de falha nas escritas secundárias.
    pub fail_supplier_inserts: bool,
    pub fail_secondary_barcodes: bool,
}

#[derive(Default)]
pub struct InMemoryCatalog {
    pub state: Mutex<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_category(&self, name: &str) -> Uuid {
        let mut state = self.state.lock().unwrap();
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let id = category.id;
        state.categories.push(category);
        id
    }

    pub fn seed_warehouse(&self, name: &str) -> Uuid {
        let mut state = self.state.lock().unwrap();
        let warehouse = Warehouse {
            id: Uuid::new_v4(),
            name: name.to_string(),
            code: None,
            created_at: Utc::now(),
        };
        let id = warehouse.id;
        state.warehouses.push(warehouse);
        id
    }

    /// Planta um produto mínimo já existente (para os testes de duplicata).
    pub fn seed_product(&self, sku: &str, name: &str, category_id: Uuid) -> Uuid {
        let mut state = self.state.lock().unwrap();
        let product = Product {
            id: Uuid::new_v4(),
            kind: ProductKind::Product,
            sku: Some(sku.to_string()),
            service_code: None,
            name: name.to_string(),
            description: None,
            barcode: None,
            barcode_type: None,
            category_id,
            brand_id: None,
            price: Decimal::ZERO,
            cost: Decimal::ZERO,
            original_price: Decimal::ZERO,
            original_cost: Decimal::ZERO,
            import_currency: None,
            selling_currency: None,
            uom_base: "pcs".to_string(),
            uom_sell: "pcs".to_string(),
            duration_hours: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let id = product.id;
        state.products.push(product);
        id
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn first_category(&self) -> Result<Option<Category>, AppError> {
        Ok(self.state.lock().unwrap().categories.first().cloned())
    }

    async fn first_warehouse(&self) -> Result<Option<Warehouse>, AppError> {
        Ok(self.state.lock().unwrap().warehouses.first().cloned())
    }

    async fn list_brands(&self) -> Result<Vec<Brand>, AppError> {
        Ok(self.state.lock().unwrap().brands.clone())
    }

    async fn find_category_containing(
        &self,
        fragment: &str,
    ) -> Result<Option<Category>, AppError> {
        let needle = fragment.to_lowercase();
        Ok(self
            .state
            .lock()
            .unwrap()
            .categories
            .iter()
            .find(|c| c.name.to_lowercase().contains(&needle))
            .cloned())
    }

    async fn identifier_exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.state.lock().unwrap().products.iter().any(|p| {
            p.sku.as_deref() == Some(code) || p.service_code.as_deref() == Some(code)
        }))
    }

    async fn barcode_exists(&self, barcode: &str) -> Result<bool, AppError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .products
            .iter()
            .any(|p| p.barcode.as_deref() == Some(barcode)))
    }

    async fn create_brand(&self, name: &str, auto_created: bool) -> Result<Brand, AppError> {
        let mut state = self.state.lock().unwrap();
        if state
            .brands
            .iter()
            .any(|b| b.name.to_lowercase() == name.to_lowercase())
        {
            return Err(AppError::BrandNameAlreadyExists(name.to_string()));
        }

        let brand = Brand {
            id: Uuid::new_v4(),
            name: name.to_string(),
            auto_created,
            created_at: Utc::now(),
        };
        state.brands.push(brand.clone());
        Ok(brand)
    }

    async fn insert_product(&self, new_product: NewProduct) -> Result<Product, AppError> {
        let mut state = self.state.lock().unwrap();

        let conflict = state.products.iter().any(|p| {
            (new_product.sku.is_some() && p.sku == new_product.sku)
                || (new_product.service_code.is_some() && p.service_code == new_product.service_code)
                || (new_product.barcode.is_some() && p.barcode == new_product.barcode)
        });
        if conflict {
            return Err(AppError::UniqueConstraintViolation(
                "products unique index".to_string(),
            ));
        }

        let product = Product {
            id: Uuid::new_v4(),
            kind: new_product.kind,
            sku: new_product.sku,
            service_code: new_product.service_code,
            name: new_product.name,
            description: new_product.description,
            barcode: new_product.barcode,
            barcode_type: new_product.barcode_type,
            category_id: new_product.category_id,
            brand_id: new_product.brand_id,
            price: new_product.price,
            cost: new_product.cost,
            original_price: new_product.original_price,
            original_cost: new_product.original_cost,
            import_currency: new_product.import_currency,
            selling_currency: new_product.selling_currency,
            uom_base: new_product.uom_base,
            uom_sell: new_product.uom_sell,
            duration_hours: new_product.duration_hours,
            active: new_product.active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        state.products.push(product.clone());
        Ok(product)
    }

    async fn insert_stock_item(&self, new_item: NewStockItem) -> Result<StockItem, AppError> {
        let mut state = self.state.lock().unwrap();
        let item = StockItem {
            id: Uuid::new_v4(),
            product_id: new_item.product_id,
            warehouse_id: new_item.warehouse_id,
            quantity: new_item.quantity,
            reserved: new_item.reserved,
            available: new_item.available,
            average_cost: new_item.average_cost,
            total_value: new_item.total_value,
            reorder_point: new_item.reorder_point,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        state.stock_items.push(item.clone());
        Ok(item)
    }

    async fn insert_product_supplier(
        &self,
        new_supplier: NewProductSupplier,
    ) -> Result<ProductSupplier, AppError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_supplier_inserts {
            return Err(AppError::UniqueConstraintViolation(
                "simulated supplier failure".to_string(),
            ));
        }

        let supplier = ProductSupplier {
            id: Uuid::new_v4(),
            product_id: new_supplier.product_id,
            supplier_name: new_supplier.supplier_name,
            supplier_sku: new_supplier.supplier_sku,
            supplier_barcode: new_supplier.supplier_barcode,
            supplier_cost: new_supplier.supplier_cost,
            created_at: Utc::now(),
        };
        state.suppliers.push(supplier.clone());
        Ok(supplier)
    }

    async fn insert_product_barcode(
        &self,
        new_barcode: NewProductBarcode,
    ) -> Result<ProductBarcode, AppError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_secondary_barcodes {
            return Err(AppError::UniqueConstraintViolation(
                "simulated barcode failure".to_string(),
            ));
        }

        if state.barcodes.iter().any(|b| b.barcode == new_barcode.barcode) {
            return Err(AppError::UniqueConstraintViolation(
                "product_barcodes unique index".to_string(),
            ));
        }

        let barcode = ProductBarcode {
            id: Uuid::new_v4(),
            product_id: new_barcode.product_id,
            barcode: new_barcode.barcode,
            barcode_type: new_barcode.barcode_type,
            is_primary: false,
            created_at: Utc::now(),
        };
        state.barcodes.push(barcode.clone());
        Ok(barcode)
    }
}
