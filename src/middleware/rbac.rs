// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{common::error::AppError, models::auth::Broker};

/// Guardião das rotas administrativas: só passa "admin" e "backoffice".
/// Declarado como extrator para aparecer na assinatura do handler.
pub struct RequireAdmin;

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let broker = parts.extensions.get::<Broker>().ok_or(AppError::InvalidToken)?;

        if !broker.role.is_administrative() {
            return Err(AppError::Forbidden);
        }

        Ok(RequireAdmin)
    }
}
