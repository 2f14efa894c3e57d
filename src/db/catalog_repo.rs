// src/db/catalog_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Accommodation, Carrier, City, Modality},
};

// Repositório dos cadastros de apoio: cidades, operadoras, modalidades
// e acomodações. Todas as listagens vêm ordenadas por nome para exibição.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

fn map_unique(message: &str, e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::UniqueConstraintViolation(message.to_string());
        }
    }
    e.into()
}

fn map_delete(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Cadastro usado por alguma tabela de preço
        if db_err.is_foreign_key_violation() {
            return AppError::ReferencedByOtherRecords;
        }
    }
    e.into()
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CIDADES
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn create_city(
        &self,
        name: &str,
        state: &str,
        ibge_code: Option<&str>,
        notes: Option<&str>,
        elective_consultation: Option<Decimal>,
        urgent_consultation: Option<Decimal>,
        simple_exam: Option<Decimal>,
        complex_exam: Option<Decimal>,
        special_therapies: Option<Decimal>,
        other_therapies: Option<Decimal>,
    ) -> Result<City, AppError> {
        let city = sqlx::query_as::<_, City>(
            r#"
            INSERT INTO cities (
                name, state, ibge_code, notes,
                elective_consultation, urgent_consultation,
                simple_exam, complex_exam, special_therapies, other_therapies
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(state)
        .bind(ibge_code)
        .bind(notes)
        .bind(elective_consultation)
        .bind(urgent_consultation)
        .bind(simple_exam)
        .bind(complex_exam)
        .bind(special_therapies)
        .bind(other_therapies)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique("Esta cidade já está cadastrada para este estado.", e))?;

        Ok(city)
    }

    pub async fn list_cities(&self) -> Result<Vec<City>, AppError> {
        let cities = sqlx::query_as::<_, City>("SELECT * FROM cities ORDER BY name, state")
            .fetch_all(&self.pool)
            .await?;
        Ok(cities)
    }

    pub async fn get_city(&self, id: Uuid) -> Result<Option<City>, AppError> {
        let city = sqlx::query_as::<_, City>("SELECT * FROM cities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(city)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_city(
        &self,
        id: Uuid,
        name: &str,
        state: &str,
        ibge_code: Option<&str>,
        notes: Option<&str>,
        elective_consultation: Option<Decimal>,
        urgent_consultation: Option<Decimal>,
        simple_exam: Option<Decimal>,
        complex_exam: Option<Decimal>,
        special_therapies: Option<Decimal>,
        other_therapies: Option<Decimal>,
    ) -> Result<Option<City>, AppError> {
        let city = sqlx::query_as::<_, City>(
            r#"
            UPDATE cities
            SET name = $2, state = $3, ibge_code = $4, notes = $5,
                elective_consultation = $6, urgent_consultation = $7,
                simple_exam = $8, complex_exam = $9,
                special_therapies = $10, other_therapies = $11,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(state)
        .bind(ibge_code)
        .bind(notes)
        .bind(elective_consultation)
        .bind(urgent_consultation)
        .bind(simple_exam)
        .bind(complex_exam)
        .bind(special_therapies)
        .bind(other_therapies)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique("Esta cidade já está cadastrada para este estado.", e))?;

        Ok(city)
    }

    pub async fn delete_city(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_delete)?;

        if result.rows_affected() == 0 {
            return Err(AppError::RecordNotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  OPERADORAS
    // =========================================================================

    pub async fn create_carrier(
        &self,
        name: &str,
        validity_notes: Option<&str>,
        registered_at: Option<NaiveDate>,
    ) -> Result<Carrier, AppError> {
        let carrier = sqlx::query_as::<_, Carrier>(
            r#"
            INSERT INTO carriers (name, validity_notes, registered_at)
            VALUES ($1, $2, COALESCE($3, CURRENT_DATE))
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(validity_notes)
        .bind(registered_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique("Esta operadora já está cadastrada.", e))?;

        Ok(carrier)
    }

    pub async fn list_carriers(&self) -> Result<Vec<Carrier>, AppError> {
        let carriers = sqlx::query_as::<_, Carrier>("SELECT * FROM carriers ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(carriers)
    }

    pub async fn get_carrier(&self, id: Uuid) -> Result<Option<Carrier>, AppError> {
        let carrier = sqlx::query_as::<_, Carrier>("SELECT * FROM carriers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(carrier)
    }

    pub async fn update_carrier(
        &self,
        id: Uuid,
        name: &str,
        validity_notes: Option<&str>,
        registered_at: Option<NaiveDate>,
    ) -> Result<Option<Carrier>, AppError> {
        let carrier = sqlx::query_as::<_, Carrier>(
            r#"
            UPDATE carriers
            SET name = $2, validity_notes = $3,
                registered_at = COALESCE($4, registered_at),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(validity_notes)
        .bind(registered_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique("Esta operadora já está cadastrada.", e))?;

        Ok(carrier)
    }

    pub async fn delete_carrier(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM carriers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_delete)?;

        if result.rows_affected() == 0 {
            return Err(AppError::RecordNotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  MODALIDADES
    // =========================================================================

    pub async fn create_modality(&self, name: &str) -> Result<Modality, AppError> {
        let modality = sqlx::query_as::<_, Modality>(
            "INSERT INTO modalities (name) VALUES ($1) RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique("Esta modalidade já está cadastrada.", e))?;

        Ok(modality)
    }

    pub async fn list_modalities(&self) -> Result<Vec<Modality>, AppError> {
        let modalities = sqlx::query_as::<_, Modality>("SELECT * FROM modalities ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(modalities)
    }

    pub async fn get_modality(&self, id: Uuid) -> Result<Option<Modality>, AppError> {
        let modality = sqlx::query_as::<_, Modality>("SELECT * FROM modalities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(modality)
    }

    pub async fn update_modality(&self, id: Uuid, name: &str) -> Result<Option<Modality>, AppError> {
        let modality = sqlx::query_as::<_, Modality>(
            "UPDATE modalities SET name = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique("Esta modalidade já está cadastrada.", e))?;

        Ok(modality)
    }

    pub async fn delete_modality(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM modalities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_delete)?;

        if result.rows_affected() == 0 {
            return Err(AppError::RecordNotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  ACOMODAÇÕES
    // =========================================================================

    pub async fn create_accommodation(
        &self,
        name: &str,
        ans_registry: Option<&str>,
    ) -> Result<Accommodation, AppError> {
        let accommodation = sqlx::query_as::<_, Accommodation>(
            "INSERT INTO accommodations (name, ans_registry) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(ans_registry)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique("Esta acomodação já está cadastrada.", e))?;

        Ok(accommodation)
    }

    pub async fn list_accommodations(&self) -> Result<Vec<Accommodation>, AppError> {
        let accommodations =
            sqlx::query_as::<_, Accommodation>("SELECT * FROM accommodations ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(accommodations)
    }

    pub async fn get_accommodation(&self, id: Uuid) -> Result<Option<Accommodation>, AppError> {
        let accommodation =
            sqlx::query_as::<_, Accommodation>("SELECT * FROM accommodations WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(accommodation)
    }

    pub async fn update_accommodation(
        &self,
        id: Uuid,
        name: &str,
        ans_registry: Option<&str>,
    ) -> Result<Option<Accommodation>, AppError> {
        let accommodation = sqlx::query_as::<_, Accommodation>(
            r#"
            UPDATE accommodations
            SET name = $2, ans_registry = $3, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(ans_registry)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique("Esta acomodação já está cadastrada.", e))?;

        Ok(accommodation)
    }

    pub async fn delete_accommodation(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM accommodations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_delete)?;

        if result.rows_affected() == 0 {
            return Err(AppError::RecordNotFound);
        }
        Ok(())
    }
}
