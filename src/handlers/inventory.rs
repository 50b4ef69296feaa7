// src/handlers/inventory.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::inventory::{StockItem, Warehouse},
};

// ---
// Payload: CreateWarehouse
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarehousePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Depósito Central")]
    pub name: String,
    pub code: Option<String>,
}

// POST /api/inventory/warehouses
#[utoipa::path(
    post,
    path = "/api/inventory/warehouses",
    tag = "Inventory",
    request_body = CreateWarehousePayload,
    responses(
        (status = 201, description = "Depósito criado", body = Warehouse),
        (status = 409, description = "Nome já em uso")
    )
)]
pub async fn create_warehouse(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateWarehousePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let warehouse = app_state
        .inventory_service
        .create_warehouse(&payload.name, payload.code.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(warehouse)))
}

// GET /api/inventory/warehouses
#[utoipa::path(
    get,
    path = "/api/inventory/warehouses",
    tag = "Inventory",
    responses(
        (status = 200, description = "Lista de depósitos", body = Vec<Warehouse>)
    )
)]
pub async fn list_warehouses(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let warehouses = app_state.inventory_service.list_warehouses().await?;
    Ok((StatusCode::OK, Json(warehouses)))
}

// GET /api/inventory/stock
#[utoipa::path(
    get,
    path = "/api/inventory/stock",
    tag = "Inventory",
    responses(
        (status = 200, description = "Saldos de estoque", body = Vec<StockItem>)
    )
)]
pub async fn list_stock(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let stock = app_state.inventory_service.list_stock().await?;
    Ok((StatusCode::OK, Json(stock)))
}
