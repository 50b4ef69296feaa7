// src/handlers/import.rs

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{common::error::AppError, config::AppState, models::import::ImportReport};

// POST /api/inventory/import
//
// Multipart com um único campo `file` (CSV ou planilha Excel). O lote
// inteiro roda dentro desta requisição, linha a linha, e a resposta traz
// o placar: { success, errors, warnings }.
#[utoipa::path(
    post,
    path = "/api/inventory/import",
    tag = "Inventory",
    responses(
        (status = 200, description = "Lote processado", body = ImportReport),
        (status = 400, description = "Arquivo ausente, ilegível ou pré-condição do lote não atendida")
    )
)]
pub async fn import_products(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    // Procura o campo `file` no formulário.
    let mut upload: Option<(String, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::DecodeError(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.csv").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::DecodeError(e.to_string()))?;

        upload = Some((file_name, content_type, bytes.to_vec()));
        break;
    }

    let Some((file_name, content_type, payload)) = upload else {
        return Err(AppError::MissingUploadFile);
    };

    let report = app_state
        .import_service
        .import_file(&file_name, content_type.as_deref(), &payload)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}
