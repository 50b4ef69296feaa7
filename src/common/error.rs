use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Só condições fatais do LOTE viram AppError: problema de UMA linha da
// planilha vira string no relatório, nunca um erro daqui.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // --- Erros do upload / decodificação do arquivo ---
    #[error("Nenhum arquivo enviado")]
    MissingUploadFile,

    #[error("Formato de arquivo não suportado: {0}")]
    UnsupportedFormat(String),

    #[error("Falha ao decodificar o arquivo: {0}")]
    DecodeError(String),

    // Zero linhas de dados não é "exceção": é o lote inteiro inválido.
    #[error("No valid data found in file")]
    EmptyImport,

    // --- Pré-condições do lote ---
    #[error("No category configured - create at least one category before importing")]
    NoCategoryConfigured,

    #[error("No warehouse configured - create at least one warehouse before importing")]
    NoWarehouseConfigured,

    // --- CRUD do catálogo ---
    #[error("Categoria '{0}' já existe")]
    CategoryNameAlreadyExists(String),

    #[error("Marca '{0}' já existe")]
    BrandNameAlreadyExists(String),

    #[error("Depósito '{0}' já existe")]
    WarehouseNameAlreadyExists(String),

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::MissingUploadFile
            | AppError::UnsupportedFormat(_)
            | AppError::DecodeError(_)
            | AppError::EmptyImport
            | AppError::NoCategoryConfigured
            | AppError::NoWarehouseConfigured => (StatusCode::BAD_REQUEST, self.to_string()),

            AppError::CategoryNameAlreadyExists(_)
            | AppError::BrandNameAlreadyExists(_)
            | AppError::WarehouseNameAlreadyExists(_)
            | AppError::UniqueConstraintViolation(_) => (StatusCode::CONFLICT, self.to_string()),

            AppError::ResourceNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
