// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Catalog ---
        handlers::catalog::create_category,
        handlers::catalog::list_categories,
        handlers::catalog::create_brand,
        handlers::catalog::list_brands,
        handlers::catalog::list_products,

        // --- Inventory ---
        handlers::inventory::create_warehouse,
        handlers::inventory::list_warehouses,
        handlers::inventory::list_stock,

        // --- Import ---
        handlers::import::import_products,
    ),
    components(
        schemas(
            // --- Catalog ---
            models::catalog::ProductKind,
            models::catalog::Category,
            models::catalog::Brand,
            models::catalog::Product,
            models::catalog::ProductSupplier,
            models::catalog::ProductBarcode,

            // --- Inventory ---
            models::inventory::Warehouse,
            models::inventory::StockItem,

            // --- Import ---
            models::import::ImportReport,

            // --- Payloads ---
            handlers::catalog::CreateCategoryPayload,
            handlers::catalog::CreateBrandPayload,
            handlers::inventory::CreateWarehousePayload,
        )
    ),
    tags(
        (name = "Catalog", description = "Catálogo de produtos, categorias e marcas"),
        (name = "Inventory", description = "Depósitos, estoque e importação em massa")
    )
)]
pub struct ApiDoc;
