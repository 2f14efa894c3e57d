// src/services/broker_service.rs

use bcrypt::hash;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::BrokerRepository,
    models::auth::{Broker, BrokerRole},
    services::auth::normalize_cpf,
};

#[derive(Clone)]
pub struct BrokerService {
    repo: BrokerRepository,
}

impl BrokerService {
    pub fn new(repo: BrokerRepository) -> Self {
        Self { repo }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        cpf: &str,
        password: &str,
        registered_at: Option<NaiveDate>,
        role: Option<BrokerRole>,
    ) -> Result<Broker, AppError> {
        let cpf = normalize_cpf(cpf);
        if cpf.len() != 11 {
            return Err(validation_error("cpf", "O CPF deve ter 11 dígitos."));
        }

        // Hashing fora da thread do executor, como no login.
        let password_clone = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.repo
            .create(
                name,
                email,
                phone,
                &cpf,
                &password_hash,
                registered_at,
                role.unwrap_or(BrokerRole::Usuario),
            )
            .await
    }

    pub async fn list(&self) -> Result<Vec<Broker>, AppError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Broker, AppError> {
        self.repo.find_by_id(id).await?.ok_or(AppError::BrokerNotFound)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        email: &str,
        phone: &str,
        terminated_at: Option<NaiveDate>,
        role: BrokerRole,
    ) -> Result<Broker, AppError> {
        self.repo
            .update(id, name, email, phone, terminated_at, role)
            .await?
            .ok_or(AppError::BrokerNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete(id).await
    }
}

// Helper para criar erro de validação fora do derive
fn validation_error(field: &str, message: &str) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    let mut err = validator::ValidationError::new("invalid");
    err.message = Some(message.to_string().into());

    // Leak seguro para erro estático
    let static_field: &'static str = Box::leak(field.to_string().into_boxed_str());
    errors.add(static_field.into(), err);

    AppError::ValidationError(errors)
}
