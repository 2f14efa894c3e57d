// src/models/auth.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Mapeia o CREATE TYPE broker_role do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "broker_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BrokerRole {
    Usuario,
    Admin,
    Backoffice,
}

impl BrokerRole {
    // "admin" e "backoffice" enxergam todos os orçamentos e gerenciam corretores.
    pub fn is_administrative(&self) -> bool {
        matches!(self, BrokerRole::Admin | BrokerRole::Backoffice)
    }
}

// Representa um corretor vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Broker {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    // Só dígitos; é o identificador de login.
    pub cpf: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    #[schema(value_type = String, format = Date)]
    pub registered_at: NaiveDate,
    #[schema(value_type = Option<String>, format = Date)]
    pub terminated_at: Option<NaiveDate>,
    pub role: BrokerRole,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para cadastro de um novo corretor
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBrokerPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Maria da Silva")]
    pub name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "maria@corretora.com.br")]
    pub email: String,

    #[validate(length(min = 8, message = "O telefone fornecido é inválido."))]
    #[schema(example = "(19) 99999-0000")]
    pub phone: String,

    #[validate(length(min = 11, message = "O CPF deve ter 11 dígitos."))]
    #[schema(example = "123.456.789-00")]
    pub cpf: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    #[schema(value_type = Option<String>, format = Date)]
    pub registered_at: Option<NaiveDate>,

    #[serde(default)]
    pub role: Option<BrokerRole>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 11, message = "O CPF deve ter 11 dígitos."))]
    #[schema(example = "123.456.789-00")]
    pub cpf: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resumo que o cliente guarda após o login
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrokerSummary {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub role: BrokerRole,
}

impl From<&Broker> for BrokerSummary {
    fn from(broker: &Broker) -> Self {
        Self {
            id: broker.id,
            name: broker.name.clone(),
            phone: broker.phone.clone(),
            role: broker.role,
        }
    }
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub broker: BrokerSummary,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do corretor)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}
