// src/services/catalog_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{Accommodation, Carrier, City, Modality},
};

// Camada fina sobre o repositório: os cadastros de apoio não têm regra
// de negócio além da validação dos payloads, feita nos handlers.
#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
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
        copay_values: [Option<Decimal>; 6],
    ) -> Result<City, AppError> {
        let [elective, urgent, simple, complex, special, other] = copay_values;
        self.repo
            .create_city(name, state, ibge_code, notes, elective, urgent, simple, complex, special, other)
            .await
    }

    pub async fn list_cities(&self) -> Result<Vec<City>, AppError> {
        self.repo.list_cities().await
    }

    pub async fn get_city(&self, id: Uuid) -> Result<City, AppError> {
        self.repo.get_city(id).await?.ok_or(AppError::RecordNotFound)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_city(
        &self,
        id: Uuid,
        name: &str,
        state: &str,
        ibge_code: Option<&str>,
        notes: Option<&str>,
        copay_values: [Option<Decimal>; 6],
    ) -> Result<City, AppError> {
        let [elective, urgent, simple, complex, special, other] = copay_values;
        self.repo
            .update_city(id, name, state, ibge_code, notes, elective, urgent, simple, complex, special, other)
            .await?
            .ok_or(AppError::RecordNotFound)
    }

    pub async fn delete_city(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete_city(id).await
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
        self.repo.create_carrier(name, validity_notes, registered_at).await
    }

    pub async fn list_carriers(&self) -> Result<Vec<Carrier>, AppError> {
        self.repo.list_carriers().await
    }

    pub async fn get_carrier(&self, id: Uuid) -> Result<Carrier, AppError> {
        self.repo.get_carrier(id).await?.ok_or(AppError::RecordNotFound)
    }

    pub async fn update_carrier(
        &self,
        id: Uuid,
        name: &str,
        validity_notes: Option<&str>,
        registered_at: Option<NaiveDate>,
    ) -> Result<Carrier, AppError> {
        self.repo
            .update_carrier(id, name, validity_notes, registered_at)
            .await?
            .ok_or(AppError::RecordNotFound)
    }

    pub async fn delete_carrier(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete_carrier(id).await
    }

    // =========================================================================
    //  MODALIDADES
    // =========================================================================

    pub async fn create_modality(&self, name: &str) -> Result<Modality, AppError> {
        self.repo.create_modality(name).await
    }

    pub async fn list_modalities(&self) -> Result<Vec<Modality>, AppError> {
        self.repo.list_modalities().await
    }

    pub async fn get_modality(&self, id: Uuid) -> Result<Modality, AppError> {
        self.repo.get_modality(id).await?.ok_or(AppError::RecordNotFound)
    }

    pub async fn update_modality(&self, id: Uuid, name: &str) -> Result<Modality, AppError> {
        self.repo.update_modality(id, name).await?.ok_or(AppError::RecordNotFound)
    }

    pub async fn delete_modality(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete_modality(id).await
    }

    // =========================================================================
    //  ACOMODAÇÕES
    // =========================================================================

    pub async fn create_accommodation(
        &self,
        name: &str,
        ans_registry: Option<&str>,
    ) -> Result<Accommodation, AppError> {
        self.repo.create_accommodation(name, ans_registry).await
    }

    pub async fn list_accommodations(&self) -> Result<Vec<Accommodation>, AppError> {
        self.repo.list_accommodations().await
    }

    pub async fn get_accommodation(&self, id: Uuid) -> Result<Accommodation, AppError> {
        self.repo.get_accommodation(id).await?.ok_or(AppError::RecordNotFound)
    }

    pub async fn update_accommodation(
        &self,
        id: Uuid,
        name: &str,
        ans_registry: Option<&str>,
    ) -> Result<Accommodation, AppError> {
        self.repo
            .update_accommodation(id, name, ans_registry)
            .await?
            .ok_or(AppError::RecordNotFound)
    }

    pub async fn delete_accommodation(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete_accommodation(id).await
    }
}
