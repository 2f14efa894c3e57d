// src/db/quote_repo.rs

use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::pricing::DocumentType,
    models::quote::{Observation, PipelineMonthlyEntry, PipelineStage, Quote},
};

#[derive(Clone)]
pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Insere o orçamento já precificado. Recebe o executor para rodar na
    // mesma transação que resolveu a tabela de preço.
    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        price_table_id: Uuid,
        broker_id: Uuid,
        client_name: &str,
        client_phone: &str,
        document_type: DocumentType,
        ages: &[i32],
        total_value: Decimal,
    ) -> Result<Quote, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let quote = sqlx::query_as::<_, Quote>(
            r#"
            INSERT INTO quotes (
                price_table_id, broker_id, client_name, client_phone,
                document_type, ages, total_value
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(price_table_id)
        .bind(broker_id)
        .bind(client_name)
        .bind(client_phone)
        .bind(document_type)
        .bind(ages)
        .bind(total_value)
        .fetch_one(executor)
        .await?;

        Ok(quote)
    }

    pub async fn list_all(&self) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>("SELECT * FROM quotes ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(quotes)
    }

    pub async fn list_by_broker(&self, broker_id: Uuid) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>(
            "SELECT * FROM quotes WHERE broker_id = $1 ORDER BY created_at DESC",
        )
        .bind(broker_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(quotes)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>("SELECT * FROM quotes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(quote)
    }

    // Troca a etapa e, se vier observação, acrescenta ao histórico.
    // O `||` do jsonb garante o apenas-acréscimo: nada é editado nem removido.
    pub async fn update_stage(
        &self,
        id: Uuid,
        stage: PipelineStage,
        observation: Option<&Observation>,
    ) -> Result<Option<Quote>, AppError> {
        let appended = observation.map(|obs| Json(vec![obs.clone()]));

        let quote = sqlx::query_as::<_, Quote>(
            r#"
            UPDATE quotes
            SET stage = $2,
                observations = observations || COALESCE($3::jsonb, '[]'::jsonb),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(stage)
        .bind(appended)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quote)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::QuoteNotFound);
        }
        Ok(())
    }

    // Contagem mensal por etapa para o dashboard. `broker_id` presente
    // restringe ao dono; ausente agrega tudo (visão administrativa).
    pub async fn pipeline_monthly(
        &self,
        broker_id: Option<Uuid>,
    ) -> Result<Vec<PipelineMonthlyEntry>, AppError> {
        let entries = sqlx::query_as::<_, PipelineMonthlyEntry>(
            r#"
            SELECT to_char(quote_date, 'YYYY-MM') AS month,
                   stage,
                   COUNT(*) AS count
            FROM quotes
            WHERE ($1::uuid IS NULL OR broker_id = $1)
            GROUP BY 1, 2
            ORDER BY 1 DESC, 2
            "#,
        )
        .bind(broker_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
