// src/services/quote_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{PriceTableRepository, QuoteRepository},
    models::auth::Broker,
    models::pricing::DocumentType,
    models::quote::{Observation, PipelineMonthlyEntry, PipelineStage, Quote},
};

#[derive(Clone)]
pub struct QuoteService {
    quote_repo: QuoteRepository,
    price_repo: PriceTableRepository,
    pool: PgPool,
}

impl QuoteService {
    pub fn new(quote_repo: QuoteRepository, price_repo: PriceTableRepository, pool: PgPool) -> Self {
        Self { quote_repo, price_repo, pool }
    }

    /// Precifica e persiste um orçamento em uma única transação:
    /// resolve a linha da tabela, soma os prêmios por faixa e insere.
    /// Se qualquer passo falhar, nada é gravado.
    pub async fn create(
        &self,
        broker: &Broker,
        price_table_id: Uuid,
        client_name: &str,
        client_phone: &str,
        document_type: DocumentType,
        ages: &[i32],
    ) -> Result<Quote, AppError> {
        let mut tx = self.pool.begin().await?;

        // Tabela inexistente é erro de validação do formulário, não 404:
        // o id veio de um dropdown que pode estar defasado.
        let table = self
            .price_repo
            .get_row(&mut *tx, price_table_id)
            .await?
            .ok_or(AppError::ReferencedRecordMissing)?;

        let total_value = table.total_premium(ages);

        let quote = self
            .quote_repo
            .create(
                &mut *tx,
                table.id,
                broker.id,
                client_name,
                client_phone,
                document_type,
                ages,
                total_value,
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Orçamento {} criado para '{}' com total {}",
            quote.id,
            quote.client_name,
            quote.total_value
        );

        Ok(quote)
    }

    // Regra de visibilidade: "usuario" só enxerga os próprios orçamentos;
    // perfis administrativos enxergam todos.
    pub async fn list(&self, broker: &Broker) -> Result<Vec<Quote>, AppError> {
        if broker.role.is_administrative() {
            self.quote_repo.list_all().await
        } else {
            self.quote_repo.list_by_broker(broker.id).await
        }
    }

    pub async fn get(&self, broker: &Broker, id: Uuid) -> Result<Quote, AppError> {
        let quote = self.quote_repo.get(id).await?.ok_or(AppError::QuoteNotFound)?;
        self.check_visibility(broker, &quote)?;
        Ok(quote)
    }

    /// Troca de etapa livre (qualquer etapa para qualquer etapa), com
    /// observação opcional carimbada pelo servidor.
    pub async fn update_stage(
        &self,
        broker: &Broker,
        id: Uuid,
        stage: PipelineStage,
        observation_text: Option<&str>,
    ) -> Result<Quote, AppError> {
        // Confere existência e dono antes de mexer.
        let current = self.quote_repo.get(id).await?.ok_or(AppError::QuoteNotFound)?;
        self.check_visibility(broker, &current)?;

        let observation = observation_text
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(|text| Observation {
                text: text.to_string(),
                noted_at: Utc::now(),
            });

        self.quote_repo
            .update_stage(id, stage, observation.as_ref())
            .await?
            .ok_or(AppError::QuoteNotFound)
    }

    pub async fn delete(&self, broker: &Broker, id: Uuid) -> Result<(), AppError> {
        let quote = self.quote_repo.get(id).await?.ok_or(AppError::QuoteNotFound)?;
        self.check_visibility(broker, &quote)?;
        self.quote_repo.delete(id).await
    }

    pub async fn pipeline_monthly(&self, broker: &Broker) -> Result<Vec<PipelineMonthlyEntry>, AppError> {
        let owner_filter = if broker.role.is_administrative() {
            None
        } else {
            Some(broker.id)
        };
        self.quote_repo.pipeline_monthly(owner_filter).await
    }

    // Orçamento de outro corretor responde 404 para quem não é admin:
    // para esse perfil, o registro não existe.
    fn check_visibility(&self, broker: &Broker, quote: &Quote) -> Result<(), AppError> {
        if !broker.role.is_administrative() && quote.broker_id != broker.id {
            return Err(AppError::QuoteNotFound);
        }
        Ok(())
    }
}
