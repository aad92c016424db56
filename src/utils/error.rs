use crate::database::StoreError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Corpo de erro devolvido por todos os endpoints
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Erros dos handlers. A conversão para HTTP acontece só aqui (ResponseError):
/// validação → 400, não encontrado → 404, store/inesperado → 500 sem detalhes para o cliente.
#[derive(Debug)]
pub enum AppError {
    InvalidRequest(String),
    NotFound(String),
    /// Falha do store com mensagem própria do endpoint; o erro original só vai para o log
    Store { message: String, source: StoreError },
    Internal(String),
}

impl AppError {
    /// Para `map_err`: `store.delete(..).await.map_err(AppError::store("Failed to delete"))?`
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Store { message: message.to_string(), source }
    }

    /// Mensagem que vai no corpo da resposta
    pub fn public_message(&self) -> &str {
        match self {
            AppError::InvalidRequest(msg) | AppError::NotFound(msg) => msg,
            AppError::Store { message, .. } => message,
            AppError::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Store { message, source } => write!(f, "{}: {}", message, source),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // O detalhe completo vai para o log do middleware RequestId, junto com o id da requisição
        log::debug!("{}", self);

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.public_message().to_string(),
        })
    }
}

/// Campo obrigatório: ausente ou string vazia contam como não informado
pub fn required(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
