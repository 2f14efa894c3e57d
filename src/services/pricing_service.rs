// src/services/pricing_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PriceTableRepository,
    models::pricing::{DocumentType, PriceTable, PriceTableDetail, PriceTableForm},
};

#[derive(Clone)]
pub struct PricingService {
    repo: PriceTableRepository,
}

impl PricingService {
    pub fn new(repo: PriceTableRepository) -> Self {
        Self { repo }
    }

    pub async fn create(&self, form: &PriceTableForm) -> Result<PriceTable, AppError> {
        self.repo.create(form).await
    }

    /// Resolve as linhas candidatas por cidade e tipo de documento.
    /// Nenhum filtro de "vigente hoje" é aplicado: a escolha da linha
    /// continua sendo do operador.
    pub async fn find(
        &self,
        city_id: Option<Uuid>,
        document_type: Option<DocumentType>,
    ) -> Result<Vec<PriceTableDetail>, AppError> {
        self.repo.find(city_id, document_type).await
    }

    pub async fn get(&self, id: Uuid) -> Result<PriceTableDetail, AppError> {
        self.repo.get(id).await?.ok_or(AppError::PriceTableNotFound)
    }

    pub async fn update(&self, id: Uuid, form: &PriceTableForm) -> Result<PriceTable, AppError> {
        self.repo.update(id, form).await?.ok_or(AppError::PriceTableNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete(id).await
    }
}
