// src/db/broker_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{Broker, BrokerRole},
};

// O repositório de corretores, responsável por todas as interações com a tabela 'brokers'
#[derive(Clone)]
pub struct BrokerRepository {
    pool: PgPool,
}

impl BrokerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um corretor pelo CPF (já normalizado para só dígitos)
    pub async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Broker>, AppError> {
        let maybe_broker = sqlx::query_as::<_, Broker>("SELECT * FROM brokers WHERE cpf = $1")
            .bind(cpf)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_broker)
    }

    // Busca um corretor pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Broker>, AppError> {
        let maybe_broker = sqlx::query_as::<_, Broker>("SELECT * FROM brokers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_broker)
    }

    pub async fn list(&self) -> Result<Vec<Broker>, AppError> {
        let brokers = sqlx::query_as::<_, Broker>("SELECT * FROM brokers ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(brokers)
    }

    // Cria um novo corretor, com tratamento específico para e-mail e CPF duplicados.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        cpf: &str,
        password_hash: &str,
        registered_at: Option<NaiveDate>,
        role: BrokerRole,
    ) -> Result<Broker, AppError> {
        let broker = sqlx::query_as::<_, Broker>(
            r#"
            INSERT INTO brokers (name, email, phone, cpf, password_hash, registered_at, role)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, CURRENT_DATE), $7)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(cpf)
        .bind(password_hash)
        .bind(registered_at)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return match db_err.constraint() {
                        Some("brokers_email_key") => AppError::EmailAlreadyExists,
                        Some("brokers_cpf_key") => AppError::CpfAlreadyExists,
                        Some(constraint) => AppError::UniqueConstraintViolation(constraint.to_string()),
                        None => AppError::UniqueConstraintViolation("brokers".to_string()),
                    };
                }
            }
            e.into()
        })?;

        Ok(broker)
    }

    // Atualiza os dados cadastrais. CPF e senha não mudam por aqui.
    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        email: &str,
        phone: &str,
        terminated_at: Option<NaiveDate>,
        role: BrokerRole,
    ) -> Result<Option<Broker>, AppError> {
        let maybe_broker = sqlx::query_as::<_, Broker>(
            r#"
            UPDATE brokers
            SET name = $2, email = $3, phone = $4, terminated_at = $5, role = $6, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(terminated_at)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })?;

        Ok(maybe_broker)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM brokers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    // Corretor com orçamentos não pode ser excluído
                    if db_err.is_foreign_key_violation() {
                        return AppError::ReferencedByOtherRecords;
                    }
                }
                e.into()
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::BrokerNotFound);
        }
        Ok(())
    }
}
