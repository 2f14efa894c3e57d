// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Brokers ---
        handlers::brokers::register,
        handlers::brokers::list,
        handlers::brokers::get,
        handlers::brokers::update,
        handlers::brokers::delete,

        // --- Catalog ---
        handlers::catalog::create_city,
        handlers::catalog::list_cities,
        handlers::catalog::get_city,
        handlers::catalog::update_city,
        handlers::catalog::delete_city,
        handlers::catalog::create_carrier,
        handlers::catalog::list_carriers,
        handlers::catalog::get_carrier,
        handlers::catalog::update_carrier,
        handlers::catalog::delete_carrier,
        handlers::catalog::create_modality,
        handlers::catalog::list_modalities,
        handlers::catalog::get_modality,
        handlers::catalog::update_modality,
        handlers::catalog::delete_modality,
        handlers::catalog::create_accommodation,
        handlers::catalog::list_accommodations,
        handlers::catalog::get_accommodation,
        handlers::catalog::update_accommodation,
        handlers::catalog::delete_accommodation,

        // --- Price tables ---
        handlers::pricing::create,
        handlers::pricing::find,
        handlers::pricing::get,
        handlers::pricing::update,
        handlers::pricing::delete,

        // --- Quotes ---
        handlers::quotes::create,
        handlers::quotes::list,
        handlers::quotes::get,
        handlers::quotes::update_stage,
        handlers::quotes::delete,

        // --- Dashboard ---
        handlers::dashboard::pipeline_monthly,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::BrokerRole,
            models::auth::Broker,
            models::auth::BrokerSummary,
            models::auth::RegisterBrokerPayload,
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Catalog ---
            models::catalog::City,
            models::catalog::Carrier,
            models::catalog::Modality,
            models::catalog::Accommodation,

            // --- Pricing ---
            models::pricing::CopayType,
            models::pricing::DocumentType,
            models::pricing::PriceTable,
            models::pricing::PriceTableDetail,
            models::pricing::PriceTableForm,

            // --- Quotes ---
            models::quote::PipelineStage,
            models::quote::Observation,
            models::quote::Quote,
            models::quote::PipelineMonthlyEntry,

            // --- Payloads ---
            handlers::brokers::UpdateBrokerPayload,
            handlers::catalog::CityPayload,
            handlers::catalog::CarrierPayload,
            handlers::catalog::ModalityPayload,
            handlers::catalog::AccommodationPayload,
            handlers::quotes::CreateQuotePayload,
            handlers::quotes::UpdateQuoteStagePayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação de corretores"),
        (name = "Brokers", description = "Cadastro de Corretores"),
        (name = "Catalog", description = "Cadastros de Apoio (Cidades, Operadoras, Modalidades e Acomodações)"),
        (name = "PriceTables", description = "Tabelas de Preço por Faixa Etária"),
        (name = "Quotes", description = "Orçamentos e Funil de Vendas"),
        (name = "Dashboard", description = "Indicadores do Pipeline")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
