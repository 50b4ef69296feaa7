// src/handlers/catalog.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::catalog::{Brand, Category, Product},
};

// ---
// Payload: CreateCategory
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Ferramentas")]
    pub name: String,
    pub description: Option<String>,
}

// POST /api/catalog/categories
#[utoipa::path(
    post,
    path = "/api/catalog/categories",
    tag = "Catalog",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Category),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Nome já em uso")
    )
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = app_state
        .catalog_service
        .create_category(&payload.name, payload.description.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

// GET /api/catalog/categories
#[utoipa::path(
    get,
    path = "/api/catalog/categories",
    tag = "Catalog",
    responses(
        (status = 200, description = "Lista de categorias", body = Vec<Category>)
    )
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.catalog_service.list_categories().await?;
    Ok((StatusCode::OK, Json(categories)))
}

// ---
// Payload: CreateBrand
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBrandPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "ACME")]
    pub name: String,
}

// POST /api/catalog/brands
#[utoipa::path(
    post,
    path = "/api/catalog/brands",
    tag = "Catalog",
    request_body = CreateBrandPayload,
    responses(
        (status = 201, description = "Marca criada", body = Brand),
        (status = 409, description = "Nome já em uso")
    )
)]
pub async fn create_brand(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateBrandPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let brand = app_state.catalog_service.create_brand(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(brand)))
}

// GET /api/catalog/brands
#[utoipa::path(
    get,
    path = "/api/catalog/brands",
    tag = "Catalog",
    responses(
        (status = 200, description = "Lista de marcas", body = Vec<Brand>)
    )
)]
pub async fn list_brands(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let brands = app_state.catalog_service.list_brands().await?;
    Ok((StatusCode::OK, Json(brands)))
}

// GET /api/catalog/products
#[utoipa::path(
    get,
    path = "/api/catalog/products",
    tag = "Catalog",
    responses(
        (status = 200, description = "Lista de produtos do catálogo", body = Vec<Product>)
    )
)]
pub async fn list_products(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.catalog_service.list_products().await?;
    Ok((StatusCode::OK, Json(products)))
}
