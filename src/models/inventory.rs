// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- 1. Depósitos ---
// O importador exige pelo menos um depósito cadastrado: todo saldo inicial
// entra no primeiro depósito encontrado.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- 2. Saldo de Estoque ---
// Uma linha por (produto, depósito). Serviços não geram saldo.
// `available` = quantity - reserved no momento da criação;
// `total_value` = quantity * average_cost.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub quantity: Decimal,
    pub reserved: Decimal,
    pub available: Decimal,
    pub average_cost: Decimal,
    pub total_value: Decimal,
    pub reorder_point: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewStockItem {
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub quantity: Decimal,
    pub reserved: Decimal,
    pub available: Decimal,
    pub average_cost: Decimal,
    pub total_value: Decimal,
    pub reorder_point: Decimal,
}
