use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("CPF já existe")]
    CpfAlreadyExists,

    #[error("Registro duplicado: {0}")]
    UniqueConstraintViolation(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Corretor não encontrado")]
    BrokerNotFound,

    #[error("Registro não encontrado")]
    RecordNotFound,

    #[error("Tabela de preço não encontrada")]
    PriceTableNotFound,

    #[error("Orçamento não encontrado")]
    QuoteNotFound,

    // Delete barrado por chave estrangeira (ex.: cidade usada em tabela de preço)
    #[error("Registro referenciado por outros cadastros")]
    ReferencedByOtherRecords,

    // Insert/update apontando para um cadastro que não existe
    #[error("Cadastro referenciado inexistente")]
    ReferencedRecordMissing,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
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
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string()),
            AppError::CpfAlreadyExists => (StatusCode::CONFLICT, "Este CPF já está cadastrado.".to_string()),
            AppError::UniqueConstraintViolation(detail) => (StatusCode::CONFLICT, detail),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "CPF ou senha inválidos.".to_string()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Token de autenticação inválido ou ausente.".to_string()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Você não tem permissão para realizar esta ação.".to_string()),
            AppError::BrokerNotFound => (StatusCode::NOT_FOUND, "Corretor não encontrado.".to_string()),
            AppError::RecordNotFound => (StatusCode::NOT_FOUND, "Registro não encontrado.".to_string()),
            AppError::PriceTableNotFound => (StatusCode::NOT_FOUND, "Tabela de preço não encontrada.".to_string()),
            AppError::QuoteNotFound => (StatusCode::NOT_FOUND, "Orçamento não encontrado.".to_string()),
            AppError::ReferencedByOtherRecords => (
                StatusCode::CONFLICT,
                "Este registro é referenciado por outros cadastros e não pode ser excluído.".to_string(),
            ),
            AppError::ReferencedRecordMissing => (
                StatusCode::BAD_REQUEST,
                "Um dos cadastros referenciados não existe.".to_string(),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
