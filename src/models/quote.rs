// src/models/quote.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::pricing::DocumentType;

// --- ENUMS ---

/// Etapa do funil de vendas.
///
/// É um rótulo livre, não um workflow imposto: qualquer etapa pode ser
/// trocada por qualquer outra. "cadastrado" e "perdido" são terminais
/// apenas por convenção da equipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "pipeline_stage", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    #[default]
    Leads,
    Negociacao,
    Fila,
    Cadastrado,
    Perdido,
}

// --- OBSERVAÇÕES ---

// Uma entrada do histórico do orçamento. O histórico é apenas-acréscimo:
// nenhuma operação exposta edita ou remove entradas.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub text: String,
    pub noted_at: DateTime<Utc>,
}

// --- ORÇAMENTO ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: Uuid,
    pub price_table_id: Uuid,
    pub broker_id: Uuid,

    pub client_name: String,
    pub client_phone: String,
    pub document_type: DocumentType,

    // Idades na ordem em que o corretor informou.
    pub ages: Vec<i32>,
    #[schema(example = "550.00")]
    pub total_value: Decimal,
    #[schema(value_type = String, format = Date)]
    pub quote_date: NaiveDate,

    pub stage: PipelineStage,
    #[schema(value_type = Vec<Observation>)]
    pub observations: Json<Vec<Observation>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Contagem do dashboard: quantos orçamentos por mês e etapa.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PipelineMonthlyEntry {
    #[schema(example = "2025-06")]
    pub month: String,
    pub stage: PipelineStage,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_serializes_to_the_five_wire_labels() {
        let cases = [
            (PipelineStage::Leads, "\"leads\""),
            (PipelineStage::Negociacao, "\"negociacao\""),
            (PipelineStage::Fila, "\"fila\""),
            (PipelineStage::Cadastrado, "\"cadastrado\""),
            (PipelineStage::Perdido, "\"perdido\""),
        ];
        for (stage, wire) in cases {
            assert_eq!(serde_json::to_string(&stage).unwrap(), wire);
            assert_eq!(serde_json::from_str::<PipelineStage>(wire).unwrap(), stage);
        }
    }

    #[test]
    fn stage_rejects_unknown_labels() {
        assert!(serde_json::from_str::<PipelineStage>("\"arquivado\"").is_err());
    }

    #[test]
    fn initial_stage_is_leads() {
        assert_eq!(PipelineStage::default(), PipelineStage::Leads);
    }

    #[test]
    fn observation_round_trips_with_timestamp() {
        let obs = Observation {
            text: "Cliente pediu retorno na sexta".to_string(),
            noted_at: Utc::now(),
        };
        let json = serde_json::to_string(&obs).unwrap();
        assert!(json.contains("notedAt"));

        let back: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(back.text, obs.text);
        assert_eq!(back.noted_at, obs.noted_at);
    }
}
