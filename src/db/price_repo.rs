// src/db/price_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::pricing::{DocumentType, PriceTable, PriceTableDetail, PriceTableForm},
};

// Colunas e joins compartilhados pelas consultas de listagem/detalhe.
const DETAIL_SELECT: &str = r#"
    SELECT p.*,
           c.name AS city_name,
           c.state AS city_state,
           o.name AS carrier_name,
           a.name AS accommodation_name,
           m.name AS modality_name
    FROM price_tables p
    JOIN cities c ON c.id = p.city_id
    JOIN carriers o ON o.id = p.carrier_id
    JOIN accommodations a ON a.id = p.accommodation_id
    JOIN modalities m ON m.id = p.modality_id
"#;

#[derive(Clone)]
pub struct PriceTableRepository {
    pool: PgPool,
}

fn map_missing_reference(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return AppError::ReferencedRecordMissing;
        }
    }
    e.into()
}

impl PriceTableRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, form: &PriceTableForm) -> Result<PriceTable, AppError> {
        let table = sqlx::query_as::<_, PriceTable>(
            r#"
            INSERT INTO price_tables (
                city_id, carrier_id, accommodation_id, modality_id,
                copay_type, document_type, valid_from, valid_until,
                rate_00_18, rate_19_23, rate_24_28, rate_29_33, rate_34_38,
                rate_39_43, rate_44_48, rate_49_53, rate_54_58, rate_59_plus
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8,
                    $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING *
            "#,
        )
        .bind(form.city_id)
        .bind(form.carrier_id)
        .bind(form.accommodation_id)
        .bind(form.modality_id)
        .bind(form.copay_type)
        .bind(form.document_type)
        .bind(form.valid_from)
        .bind(form.valid_until)
        .bind(form.rate_00_18)
        .bind(form.rate_19_23)
        .bind(form.rate_24_28)
        .bind(form.rate_29_33)
        .bind(form.rate_34_38)
        .bind(form.rate_39_43)
        .bind(form.rate_44_48)
        .bind(form.rate_49_53)
        .bind(form.rate_54_58)
        .bind(form.rate_59_plus)
        .fetch_one(&self.pool)
        .await
        .map_err(map_missing_reference)?;

        Ok(table)
    }

    /// O resolvedor: filtra por cidade e/ou tipo de documento (ambos
    /// opcionais) e ordena por cidade, operadora, modalidade, acomodação
    /// e início de vigência — ordenação estável para leitura humana.
    pub async fn find(
        &self,
        city_id: Option<Uuid>,
        document_type: Option<DocumentType>,
    ) -> Result<Vec<PriceTableDetail>, AppError> {
        let sql = format!(
            r#"
            {DETAIL_SELECT}
            WHERE ($1::uuid IS NULL OR p.city_id = $1)
              AND ($2::document_type IS NULL OR p.document_type = $2)
            ORDER BY c.name, o.name, m.name, a.name, p.valid_from
            "#
        );

        let tables = sqlx::query_as::<_, PriceTableDetail>(&sql)
            .bind(city_id)
            .bind(document_type)
            .fetch_all(&self.pool)
            .await?;

        Ok(tables)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<PriceTableDetail>, AppError> {
        let sql = format!("{DETAIL_SELECT} WHERE p.id = $1");

        let table = sqlx::query_as::<_, PriceTableDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(table)
    }

    // Versão crua (sem joins) para o fluxo de precificação, que roda
    // dentro da transação de criação do orçamento.
    pub async fn get_row<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<PriceTable>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let table = sqlx::query_as::<_, PriceTable>("SELECT * FROM price_tables WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(table)
    }

    pub async fn update(&self, id: Uuid, form: &PriceTableForm) -> Result<Option<PriceTable>, AppError> {
        let table = sqlx::query_as::<_, PriceTable>(
            r#"
            UPDATE price_tables
            SET city_id = $2, carrier_id = $3, accommodation_id = $4, modality_id = $5,
                copay_type = $6, document_type = $7, valid_from = $8, valid_until = $9,
                rate_00_18 = $10, rate_19_23 = $11, rate_24_28 = $12, rate_29_33 = $13,
                rate_34_38 = $14, rate_39_43 = $15, rate_44_48 = $16, rate_49_53 = $17,
                rate_54_58 = $18, rate_59_plus = $19,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(form.city_id)
        .bind(form.carrier_id)
        .bind(form.accommodation_id)
        .bind(form.modality_id)
        .bind(form.copay_type)
        .bind(form.document_type)
        .bind(form.valid_from)
        .bind(form.valid_until)
        .bind(form.rate_00_18)
        .bind(form.rate_19_23)
        .bind(form.rate_24_28)
        .bind(form.rate_29_33)
        .bind(form.rate_34_38)
        .bind(form.rate_39_43)
        .bind(form.rate_44_48)
        .bind(form.rate_49_53)
        .bind(form.rate_54_58)
        .bind(form.rate_59_plus)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_missing_reference)?;

        Ok(table)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM price_tables WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    // Tabela usada por algum orçamento
                    if db_err.is_foreign_key_violation() {
                        return AppError::ReferencedByOtherRecords;
                    }
                }
                e.into()
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::PriceTableNotFound);
        }
        Ok(())
    }
}
