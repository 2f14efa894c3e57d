// src/models/catalog.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Cadastros de apoio referenciados pelas tabelas de preço. Todos são
// mantidos pelo backoffice via formulário e excluídos de forma definitiva.

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: Uuid,
    #[schema(example = "Campinas")]
    pub name: String,
    #[schema(example = "SP")]
    pub state: String,
    pub ibge_code: Option<String>,
    pub notes: Option<String>,

    // Valores de referência de coparticipação, apenas informativos.
    pub elective_consultation: Option<Decimal>,
    pub urgent_consultation: Option<Decimal>,
    pub simple_exam: Option<Decimal>,
    pub complex_exam: Option<Decimal>,
    pub special_therapies: Option<Decimal>,
    pub other_therapies: Option<Decimal>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    pub id: Uuid,
    #[schema(example = "Unimed Nacional")]
    pub name: String,
    pub validity_notes: Option<String>,
    #[schema(value_type = String, format = Date)]
    pub registered_at: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Modality {
    pub id: Uuid,
    #[schema(example = "Coletivo por Adesão")]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub id: Uuid,
    #[schema(example = "Enfermaria")]
    pub name: String,
    pub ans_registry: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
