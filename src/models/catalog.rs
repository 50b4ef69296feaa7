// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- 1. Tipo do Produto ---
// O importador dobra o texto livre da coluna "type" para estes dois valores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "product_kind", rename_all = "UPPERCASE")] // Banco
#[serde(rename_all = "UPPERCASE")] // JSON
pub enum ProductKind {
    // Tudo que não for SERVICE/SERVICES vira PRODUCT no importador.
    #[default]
    Product,
    Service,
}

// --- 2. Categorias ---
// Precisam existir ANTES de qualquer importação (o lote falha se a tabela
// estiver vazia).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- 3. Marcas ---
// `auto_created` marca as marcas que o importador criou sozinho a partir
// da coluna "brand" da planilha.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    pub auto_created: bool,
    pub created_at: DateTime<Utc>,
}

// --- 4. Produtos / Serviços ---
// Esta struct é o "catálogo". O saldo físico fica em StockItem.
// Invariante: sku preenchido para PRODUCT, service_code para SERVICE,
// nunca os dois.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub kind: ProductKind,
    pub sku: Option<String>,
    pub service_code: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub barcode: Option<String>,
    pub barcode_type: Option<String>,
    pub category_id: Uuid,
    pub brand_id: Option<Uuid>,

    // Valores normalizados + os valores originais com a moeda de origem.
    pub price: Decimal,
    pub cost: Decimal,
    pub original_price: Decimal,
    pub original_cost: Decimal,
    pub import_currency: Option<String>,
    pub selling_currency: Option<String>,

    pub uom_base: String,
    pub uom_sell: String,
    pub duration_hours: Option<Decimal>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- 5. Fornecedor preferencial ---
// No máximo um por linha importada, quando a planilha traz "supplier_name".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSupplier {
    pub id: Uuid,
    pub product_id: Uuid,
    pub supplier_name: String,
    pub supplier_sku: Option<String>,
    pub supplier_barcode: Option<String>,
    pub supplier_cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

// --- 6. Códigos de barras secundários ---
// O código "primário" mora no próprio Product; aqui ficam os adicionais
// (ex: o código do fornecedor, quando difere do primário).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductBarcode {
    pub id: Uuid,
    pub product_id: Uuid,
    pub barcode: String,
    pub barcode_type: String,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

// ---
// Structs de criação (o que o escritor de persistência recebe pronto)
// ---

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub kind: ProductKind,
    pub sku: Option<String>,
    pub service_code: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub barcode: Option<String>,
    pub barcode_type: Option<String>,
    pub category_id: Uuid,
    pub brand_id: Option<Uuid>,
    pub price: Decimal,
    pub cost: Decimal,
    pub original_price: Decimal,
    pub original_cost: Decimal,
    pub import_currency: Option<String>,
    pub selling_currency: Option<String>,
    pub uom_base: String,
    pub uom_sell: String,
    pub duration_hours: Option<Decimal>,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct NewProductSupplier {
    pub product_id: Uuid,
    pub supplier_name: String,
    pub supplier_sku: Option<String>,
    pub supplier_barcode: Option<String>,
    pub supplier_cost: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub struct NewProductBarcode {
    pub product_id: Uuid,
    pub barcode: String,
    pub barcode_type: String,
}
