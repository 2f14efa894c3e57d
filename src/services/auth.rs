// src/services/auth.rs

use bcrypt::verify;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::BrokerRepository,
    models::auth::{Broker, Claims},
};

/// Reduz o CPF ao formato canônico de login: só os dígitos.
/// "123.456.789-00" e "12345678900" identificam o mesmo corretor.
pub fn normalize_cpf(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[derive(Clone)]
pub struct AuthService {
    broker_repo: BrokerRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(broker_repo: BrokerRepository, jwt_secret: String) -> Self {
        Self { broker_repo, jwt_secret }
    }

    pub async fn login(&self, cpf: &str, password: &str) -> Result<(String, Broker), AppError> {
        let cpf = normalize_cpf(cpf);

        let broker = self
            .broker_repo
            .find_by_cpf(&cpf)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        // Corretor desligado não entra mais.
        if broker.terminated_at.is_some() {
            return Err(AppError::InvalidCredentials);
        }

        let password_clone = password.to_owned();
        let password_hash_clone = broker.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(broker.id)?;
        Ok((token, broker))
    }

    pub async fn validate_token(&self, token: &str) -> Result<Broker, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let broker = self
            .broker_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::BrokerNotFound)?;

        // Token emitido antes do desligamento deixa de valer.
        if broker.terminated_at.is_some() {
            return Err(AppError::InvalidToken);
        }

        Ok(broker)
    }

    fn create_token(&self, broker_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: broker_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_cpf_strips_formatting() {
        assert_eq!(normalize_cpf("123.456.789-00"), "12345678900");
        assert_eq!(normalize_cpf("12345678900"), "12345678900");
        assert_eq!(normalize_cpf(" 123 456 789 00 "), "12345678900");
    }

    #[test]
    fn normalize_cpf_drops_everything_but_digits() {
        assert_eq!(normalize_cpf("abc"), "");
        assert_eq!(normalize_cpf("1a2b3c"), "123");
    }
}
