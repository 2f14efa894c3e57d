// src/handlers/dashboard.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedBroker,
    models::quote::PipelineMonthlyEntry,
};

// GET /api/dashboard/pipeline-monthly
// Contagem de orçamentos por mês e etapa do funil. O corretor comum vê
// só os próprios números; admin/backoffice vê o agregado da corretora.
#[utoipa::path(
    get,
    path = "/api/dashboard/pipeline-monthly",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Contagens mensais por etapa", body = Vec<PipelineMonthlyEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn pipeline_monthly(
    State(app_state): State<AppState>,
    AuthenticatedBroker(broker): AuthenticatedBroker,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.quote_service.pipeline_monthly(&broker).await?;
    Ok(Json(entries))
}
