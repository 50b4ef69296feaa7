pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod inventory_service;
pub use inventory_service::InventoryService;
pub mod import_service;
pub use import_service::ImportService;
