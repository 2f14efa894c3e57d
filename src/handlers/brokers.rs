// src/handlers/brokers.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::RequireAdmin,
    models::auth::{Broker, BrokerRole, RegisterBrokerPayload},
};

// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Brokers",
    request_body = RegisterBrokerPayload,
    responses(
        (status = 201, description = "Corretor cadastrado", body = Broker),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "CPF ou e-mail já cadastrado")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterBrokerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let broker = app_state
        .broker_service
        .register(
            &payload.name,
            &payload.email,
            &payload.phone,
            &payload.cpf,
            &payload.password,
            payload.registered_at,
            payload.role,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(broker)))
}

// GET /api/brokers
#[utoipa::path(
    get,
    path = "/api/brokers",
    tag = "Brokers",
    responses(
        (status = 200, description = "Lista de corretores", body = Vec<Broker>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let brokers = app_state.broker_service.list().await?;
    Ok(Json(brokers))
}

// GET /api/brokers/{id}
#[utoipa::path(
    get,
    path = "/api/brokers/{id}",
    tag = "Brokers",
    params(("id" = Uuid, Path, description = "ID do corretor")),
    responses(
        (status = 200, description = "Corretor", body = Broker),
        (status = 404, description = "Corretor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let broker = app_state.broker_service.get(id).await?;
    Ok(Json(broker))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBrokerPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 8, message = "O telefone fornecido é inválido."))]
    pub phone: String,

    // Preenchido quando o corretor é desligado; ele perde o acesso ao login.
    #[schema(value_type = Option<String>, format = Date)]
    pub terminated_at: Option<NaiveDate>,

    pub role: BrokerRole,
}

// PUT /api/brokers/{id} — restrito a admin/backoffice
#[utoipa::path(
    put,
    path = "/api/brokers/{id}",
    tag = "Brokers",
    params(("id" = Uuid, Path, description = "ID do corretor")),
    request_body = UpdateBrokerPayload,
    responses(
        (status = 200, description = "Corretor atualizado", body = Broker),
        (status = 403, description = "Acesso negado"),
        (status = 404, description = "Corretor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update(
    State(app_state): State<AppState>,
    _guard: RequireAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBrokerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let broker = app_state
        .broker_service
        .update(
            id,
            &payload.name,
            &payload.email,
            &payload.phone,
            payload.terminated_at,
            payload.role,
        )
        .await?;

    Ok(Json(broker))
}

// DELETE /api/brokers/{id} — restrito a admin/backoffice
#[utoipa::path(
    delete,
    path = "/api/brokers/{id}",
    tag = "Brokers",
    params(("id" = Uuid, Path, description = "ID do corretor")),
    responses(
        (status = 204, description = "Corretor excluído"),
        (status = 403, description = "Acesso negado"),
        (status = 404, description = "Corretor não encontrado"),
        (status = 409, description = "Corretor possui orçamentos")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete(
    State(app_state): State<AppState>,
    _guard: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.broker_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
