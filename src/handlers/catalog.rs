// src/handlers/catalog.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    models::catalog::{Accommodation, Carrier, City, Modality},
};

// ---
// Validação Customizada
// ---
fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// =============================================================================
//  ÁREA 1: CIDADES
// =============================================================================

// O mesmo payload serve para criar e editar, como na tela de origem.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CityPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Campinas")]
    pub name: String,

    #[validate(length(equal = 2, message = "Informe a UF com 2 letras."))]
    #[schema(example = "SP")]
    pub state: String,

    #[schema(example = "3509502")]
    pub ibge_code: Option<String>,
    pub notes: Option<String>,

    // Valores de referência de coparticipação
    #[validate(custom(function = "validate_not_negative"))]
    pub elective_consultation: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub urgent_consultation: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub simple_exam: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub complex_exam: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub special_therapies: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub other_therapies: Option<Decimal>,
}

impl CityPayload {
    fn copay_values(&self) -> [Option<Decimal>; 6] {
        [
            self.elective_consultation,
            self.urgent_consultation,
            self.simple_exam,
            self.complex_exam,
            self.special_therapies,
            self.other_therapies,
        ]
    }
}

// POST /api/cities
#[utoipa::path(
    post,
    path = "/api/cities",
    tag = "Catalog",
    request_body = CityPayload,
    responses(
        (status = 201, description = "Cidade criada", body = City),
        (status = 409, description = "Cidade já cadastrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_city(
    State(app_state): State<AppState>,
    Json(payload): Json<CityPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let city = app_state
        .catalog_service
        .create_city(
            &payload.name,
            &payload.state,
            payload.ibge_code.as_deref(),
            payload.notes.as_deref(),
            payload.copay_values(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(city)))
}

// GET /api/cities
#[utoipa::path(
    get,
    path = "/api/cities",
    tag = "Catalog",
    responses((status = 200, description = "Lista de cidades", body = Vec<City>)),
    security(("api_jwt" = []))
)]
pub async fn list_cities(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let cities = app_state.catalog_service.list_cities().await?;
    Ok(Json(cities))
}

// GET /api/cities/{id}
#[utoipa::path(
    get,
    path = "/api/cities/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID da cidade")),
    responses(
        (status = 200, description = "Cidade", body = City),
        (status = 404, description = "Cidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_city(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let city = app_state.catalog_service.get_city(id).await?;
    Ok(Json(city))
}

// PUT /api/cities/{id}
#[utoipa::path(
    put,
    path = "/api/cities/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID da cidade")),
    request_body = CityPayload,
    responses(
        (status = 200, description = "Cidade atualizada", body = City),
        (status = 404, description = "Cidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_city(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CityPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let city = app_state
        .catalog_service
        .update_city(
            id,
            &payload.name,
            &payload.state,
            payload.ibge_code.as_deref(),
            payload.notes.as_deref(),
            payload.copay_values(),
        )
        .await?;

    Ok(Json(city))
}

// DELETE /api/cities/{id}
#[utoipa::path(
    delete,
    path = "/api/cities/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID da cidade")),
    responses(
        (status = 204, description = "Cidade excluída"),
        (status = 404, description = "Cidade não encontrada"),
        (status = 409, description = "Cidade usada por tabelas de preço")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_city(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_city(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 2: OPERADORAS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarrierPayload {
    #[validate(length(min = 2, message = "O nome completo é obrigatório."))]
    #[schema(example = "Unimed Nacional")]
    pub name: String,

    // Texto livre sobre vigências praticadas pela operadora
    pub validity_notes: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub registered_at: Option<NaiveDate>,
}

// POST /api/carriers
#[utoipa::path(
    post,
    path = "/api/carriers",
    tag = "Catalog",
    request_body = CarrierPayload,
    responses(
        (status = 201, description = "Operadora criada", body = Carrier),
        (status = 409, description = "Operadora já cadastrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_carrier(
    State(app_state): State<AppState>,
    Json(payload): Json<CarrierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let carrier = app_state
        .catalog_service
        .create_carrier(
            &payload.name,
            payload.validity_notes.as_deref(),
            payload.registered_at,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(carrier)))
}

// GET /api/carriers
#[utoipa::path(
    get,
    path = "/api/carriers",
    tag = "Catalog",
    responses((status = 200, description = "Lista de operadoras", body = Vec<Carrier>)),
    security(("api_jwt" = []))
)]
pub async fn list_carriers(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let carriers = app_state.catalog_service.list_carriers().await?;
    Ok(Json(carriers))
}

// GET /api/carriers/{id}
#[utoipa::path(
    get,
    path = "/api/carriers/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID da operadora")),
    responses(
        (status = 200, description = "Operadora", body = Carrier),
        (status = 404, description = "Operadora não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_carrier(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let carrier = app_state.catalog_service.get_carrier(id).await?;
    Ok(Json(carrier))
}

// PUT /api/carriers/{id}
#[utoipa::path(
    put,
    path = "/api/carriers/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID da operadora")),
    request_body = CarrierPayload,
    responses(
        (status = 200, description = "Operadora atualizada", body = Carrier),
        (status = 404, description = "Operadora não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_carrier(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CarrierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let carrier = app_state
        .catalog_service
        .update_carrier(
            id,
            &payload.name,
            payload.validity_notes.as_deref(),
            payload.registered_at,
        )
        .await?;

    Ok(Json(carrier))
}

// DELETE /api/carriers/{id}
#[utoipa::path(
    delete,
    path = "/api/carriers/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID da operadora")),
    responses(
        (status = 204, description = "Operadora excluída"),
        (status = 404, description = "Operadora não encontrada"),
        (status = 409, description = "Operadora usada por tabelas de preço")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_carrier(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_carrier(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 3: MODALIDADES
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModalityPayload {
    #[validate(length(min = 2, message = "O nome é obrigatório."))]
    #[schema(example = "Coletivo por Adesão")]
    pub name: String,
}

// POST /api/modalities
#[utoipa::path(
    post,
    path = "/api/modalities",
    tag = "Catalog",
    request_body = ModalityPayload,
    responses(
        (status = 201, description = "Modalidade criada", body = Modality),
        (status = 409, description = "Modalidade já cadastrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_modality(
    State(app_state): State<AppState>,
    Json(payload): Json<ModalityPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let modality = app_state.catalog_service.create_modality(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(modality)))
}

// GET /api/modalities
#[utoipa::path(
    get,
    path = "/api/modalities",
    tag = "Catalog",
    responses((status = 200, description = "Lista de modalidades", body = Vec<Modality>)),
    security(("api_jwt" = []))
)]
pub async fn list_modalities(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let modalities = app_state.catalog_service.list_modalities().await?;
    Ok(Json(modalities))
}

// GET /api/modalities/{id}
#[utoipa::path(
    get,
    path = "/api/modalities/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID da modalidade")),
    responses(
        (status = 200, description = "Modalidade", body = Modality),
        (status = 404, description = "Modalidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_modality(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let modality = app_state.catalog_service.get_modality(id).await?;
    Ok(Json(modality))
}

// PUT /api/modalities/{id}
#[utoipa::path(
    put,
    path = "/api/modalities/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID da modalidade")),
    request_body = ModalityPayload,
    responses(
        (status = 200, description = "Modalidade atualizada", body = Modality),
        (status = 404, description = "Modalidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_modality(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ModalityPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let modality = app_state.catalog_service.update_modality(id, &payload.name).await?;
    Ok(Json(modality))
}

// DELETE /api/modalities/{id}
#[utoipa::path(
    delete,
    path = "/api/modalities/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID da modalidade")),
    responses(
        (status = 204, description = "Modalidade excluída"),
        (status = 404, description = "Modalidade não encontrada"),
        (status = 409, description = "Modalidade usada por tabelas de preço")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_modality(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_modality(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 4: ACOMODAÇÕES
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationPayload {
    #[validate(length(min = 2, message = "O nome é obrigatório."))]
    #[schema(example = "Enfermaria")]
    pub name: String,

    #[schema(example = "412345678")]
    pub ans_registry: Option<String>,
}

// POST /api/accommodations
#[utoipa::path(
    post,
    path = "/api/accommodations",
    tag = "Catalog",
    request_body = AccommodationPayload,
    responses(
        (status = 201, description = "Acomodação criada", body = Accommodation),
        (status = 409, description = "Acomodação já cadastrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_accommodation(
    State(app_state): State<AppState>,
    Json(payload): Json<AccommodationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let accommodation = app_state
        .catalog_service
        .create_accommodation(&payload.name, payload.ans_registry.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(accommodation)))
}

// GET /api/accommodations
#[utoipa::path(
    get,
    path = "/api/accommodations",
    tag = "Catalog",
    responses((status = 200, description = "Lista de acomodações", body = Vec<Accommodation>)),
    security(("api_jwt" = []))
)]
pub async fn list_accommodations(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let accommodations = app_state.catalog_service.list_accommodations().await?;
    Ok(Json(accommodations))
}

// GET /api/accommodations/{id}
#[utoipa::path(
    get,
    path = "/api/accommodations/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID da acomodação")),
    responses(
        (status = 200, description = "Acomodação", body = Accommodation),
        (status = 404, description = "Acomodação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_accommodation(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let accommodation = app_state.catalog_service.get_accommodation(id).await?;
    Ok(Json(accommodation))
}

// PUT /api/accommodations/{id}
#[utoipa::path(
    put,
    path = "/api/accommodations/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID da acomodação")),
    request_body = AccommodationPayload,
    responses(
        (status = 200, description = "Acomodação atualizada", body = Accommodation),
        (status = 404, description = "Acomodação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_accommodation(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AccommodationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let accommodation = app_state
        .catalog_service
        .update_accommodation(id, &payload.name, payload.ans_registry.as_deref())
        .await?;

    Ok(Json(accommodation))
}

// DELETE /api/accommodations/{id}
#[utoipa::path(
    delete,
    path = "/api/accommodations/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID da acomodação")),
    responses(
        (status = 204, description = "Acomodação excluída"),
        (status = 404, description = "Acomodação não encontrada"),
        (status = 409, description = "Acomodação usada por tabelas de preço")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_accommodation(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_accommodation(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
