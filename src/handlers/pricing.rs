// src/handlers/pricing.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::pricing::{DocumentType, PriceTable, PriceTableDetail, PriceTableForm},
};

// POST /api/price-tables
#[utoipa::path(
    post,
    path = "/api/price-tables",
    tag = "PriceTables",
    request_body = PriceTableForm,
    responses(
        (status = 201, description = "Tabela de preço criada", body = PriceTable),
        (status = 400, description = "Dados inválidos ou cadastro referenciado inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(payload): Json<PriceTableForm>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let table = app_state.pricing_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(table)))
}

// Filtros do resolvedor; ambos opcionais.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindPriceTablesQuery {
    pub city_id: Option<Uuid>,
    pub document_type: Option<DocumentType>,
}

// GET /api/price-tables
#[utoipa::path(
    get,
    path = "/api/price-tables",
    tag = "PriceTables",
    params(FindPriceTablesQuery),
    responses(
        (status = 200, description = "Tabelas de preço candidatas, ordenadas para exibição", body = Vec<PriceTableDetail>)
    ),
    security(("api_jwt" = []))
)]
pub async fn find(
    State(app_state): State<AppState>,
    Query(query): Query<FindPriceTablesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tables = app_state
        .pricing_service
        .find(query.city_id, query.document_type)
        .await?;

    Ok(Json(tables))
}

// GET /api/price-tables/{id}
#[utoipa::path(
    get,
    path = "/api/price-tables/{id}",
    tag = "PriceTables",
    params(("id" = Uuid, Path, description = "ID da tabela de preço")),
    responses(
        (status = 200, description = "Tabela de preço", body = PriceTableDetail),
        (status = 404, description = "Tabela de preço não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let table = app_state.pricing_service.get(id).await?;
    Ok(Json(table))
}

// PUT /api/price-tables/{id}
#[utoipa::path(
    put,
    path = "/api/price-tables/{id}",
    tag = "PriceTables",
    params(("id" = Uuid, Path, description = "ID da tabela de preço")),
    request_body = PriceTableForm,
    responses(
        (status = 200, description = "Tabela de preço atualizada", body = PriceTable),
        (status = 404, description = "Tabela de preço não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PriceTableForm>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let table = app_state.pricing_service.update(id, &payload).await?;
    Ok(Json(table))
}

// DELETE /api/price-tables/{id}
#[utoipa::path(
    delete,
    path = "/api/price-tables/{id}",
    tag = "PriceTables",
    params(("id" = Uuid, Path, description = "ID da tabela de preço")),
    responses(
        (status = 204, description = "Tabela de preço excluída"),
        (status = 404, description = "Tabela de preço não encontrada"),
        (status = 409, description = "Tabela usada por orçamentos")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.pricing_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
