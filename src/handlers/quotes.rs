// src/handlers/quotes.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedBroker,
    models::pricing::DocumentType,
    models::quote::{PipelineStage, Quote},
};

// ---
// Validação Customizada
// ---
fn validate_ages(ages: &Vec<i32>) -> Result<(), ValidationError> {
    if ages.iter().any(|&age| age <= 0) {
        let mut err = ValidationError::new("range");
        err.message = Some("Toda idade deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("O campo não pode ficar em branco.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: CreateQuote
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuotePayload {
    pub price_table_id: Uuid,

    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "João Pereira")]
    pub client_name: String,

    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "(19) 98888-7777")]
    pub client_phone: String,

    pub document_type: DocumentType,

    #[validate(
        length(min = 1, message = "Adicione pelo menos uma idade."),
        custom(function = "validate_ages")
    )]
    #[schema(example = json!([10, 20, 60]))]
    pub ages: Vec<i32>,
}

// POST /api/quotes
#[utoipa::path(
    post,
    path = "/api/quotes",
    tag = "Quotes",
    request_body = CreateQuotePayload,
    responses(
        (status = 201, description = "Orçamento precificado e criado na etapa 'leads'", body = Quote),
        (status = 400, description = "Dados inválidos ou tabela de preço inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create(
    State(app_state): State<AppState>,
    AuthenticatedBroker(broker): AuthenticatedBroker,
    Json(payload): Json<CreateQuotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let quote = app_state
        .quote_service
        .create(
            &broker,
            payload.price_table_id,
            payload.client_name.trim(),
            payload.client_phone.trim(),
            payload.document_type,
            &payload.ages,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(quote)))
}

// GET /api/quotes
#[utoipa::path(
    get,
    path = "/api/quotes",
    tag = "Quotes",
    responses(
        (status = 200, description = "Orçamentos visíveis para o corretor autenticado", body = Vec<Quote>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list(
    State(app_state): State<AppState>,
    AuthenticatedBroker(broker): AuthenticatedBroker,
) -> Result<impl IntoResponse, AppError> {
    let quotes = app_state.quote_service.list(&broker).await?;
    Ok(Json(quotes))
}

// GET /api/quotes/{id}
#[utoipa::path(
    get,
    path = "/api/quotes/{id}",
    tag = "Quotes",
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Orçamento", body = Quote),
        (status = 404, description = "Orçamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get(
    State(app_state): State<AppState>,
    AuthenticatedBroker(broker): AuthenticatedBroker,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let quote = app_state.quote_service.get(&broker, id).await?;
    Ok(Json(quote))
}

// ---
// Payload: UpdateQuoteStage
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuoteStagePayload {
    pub stage: PipelineStage,

    // Observação opcional; o carimbo de data/hora é do servidor.
    #[schema(example = "Cliente pediu retorno na sexta")]
    pub observation: Option<String>,
}

// PUT /api/quotes/{id}/stage
#[utoipa::path(
    put,
    path = "/api/quotes/{id}/stage",
    tag = "Quotes",
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    request_body = UpdateQuoteStagePayload,
    responses(
        (status = 200, description = "Etapa atualizada; observação anexada ao histórico", body = Quote),
        (status = 404, description = "Orçamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_stage(
    State(app_state): State<AppState>,
    AuthenticatedBroker(broker): AuthenticatedBroker,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateQuoteStagePayload>,
) -> Result<impl IntoResponse, AppError> {
    let quote = app_state
        .quote_service
        .update_stage(&broker, id, payload.stage, payload.observation.as_deref())
        .await?;

    Ok(Json(quote))
}

// DELETE /api/quotes/{id}
#[utoipa::path(
    delete,
    path = "/api/quotes/{id}",
    tag = "Quotes",
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 204, description = "Orçamento excluído"),
        (status = 404, description = "Orçamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete(
    State(app_state): State<AppState>,
    AuthenticatedBroker(broker): AuthenticatedBroker,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.quote_service.delete(&broker, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> CreateQuotePayload {
        CreateQuotePayload {
            price_table_id: Uuid::new_v4(),
            client_name: "João Pereira".to_string(),
            client_phone: "(19) 98888-7777".to_string(),
            document_type: DocumentType::Cpf,
            ages: vec![10, 20, 60],
        }
    }

    #[test]
    fn accepts_a_complete_payload() {
        assert!(sample_payload().validate().is_ok());
    }

    #[test]
    fn rejects_empty_age_list() {
        let mut payload = sample_payload();
        payload.ages = vec![];
        assert!(payload.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_ages() {
        let mut payload = sample_payload();
        payload.ages = vec![10, 0];
        assert!(payload.validate().is_err());

        payload.ages = vec![-3];
        assert!(payload.validate().is_err());
    }

    #[test]
    fn rejects_blank_client_fields() {
        let mut payload = sample_payload();
        payload.client_name = "   ".to_string();
        assert!(payload.validate().is_err());

        let mut payload = sample_payload();
        payload.client_phone = String::new();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn stage_payload_accepts_any_of_the_five_stages() {
        for stage in ["leads", "negociacao", "fila", "cadastrado", "perdido"] {
            let json = format!("{{\"stage\": \"{stage}\"}}");
            let payload: UpdateQuoteStagePayload = serde_json::from_str(&json).unwrap();
            assert!(payload.observation.is_none());
        }
    }
}
