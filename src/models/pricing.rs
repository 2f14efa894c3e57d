// src/models/pricing.rs

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---

// Mapeia o CREATE TYPE copay_type do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "copay_type")]
pub enum CopayType {
    #[sqlx(rename = "Com Coparticipação")]
    #[serde(rename = "Com Coparticipação")]
    Full,
    #[sqlx(rename = "Coparticipação Parcial")]
    #[serde(rename = "Coparticipação Parcial")]
    Partial,
}

// Mapeia o CREATE TYPE document_type do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "document_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    Cpf,
    Cnpj,
}

// --- FAIXAS ETÁRIAS ---

/// As dez faixas etárias fixas da tabela de preço.
///
/// Contíguas e exaustivas: todo inteiro cai em exatamente uma faixa,
/// com limites superiores inclusivos em 18, 23, 28, 33, 38, 43, 48, 53 e 58.
/// O mesmo mapeamento é usado no cálculo do orçamento e em qualquer
/// reexibição de valores por idade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBracket {
    From00To18,
    From19To23,
    From24To28,
    From29To33,
    From34To38,
    From39To43,
    From44To48,
    From49To53,
    From54To58,
    From59Plus,
}

impl AgeBracket {
    /// Resolve a faixa de uma idade.
    pub fn for_age(age: i32) -> Self {
        match age {
            i32::MIN..=18 => AgeBracket::From00To18,
            19..=23 => AgeBracket::From19To23,
            24..=28 => AgeBracket::From24To28,
            29..=33 => AgeBracket::From29To33,
            34..=38 => AgeBracket::From34To38,
            39..=43 => AgeBracket::From39To43,
            44..=48 => AgeBracket::From44To48,
            49..=53 => AgeBracket::From49To53,
            54..=58 => AgeBracket::From54To58,
            _ => AgeBracket::From59Plus,
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AgeBracket::From00To18 => "00 a 18",
            AgeBracket::From19To23 => "19 a 23",
            AgeBracket::From24To28 => "24 a 28",
            AgeBracket::From29To33 => "29 a 33",
            AgeBracket::From34To38 => "34 a 38",
            AgeBracket::From39To43 => "39 a 43",
            AgeBracket::From44To48 => "44 a 48",
            AgeBracket::From49To53 => "49 a 53",
            AgeBracket::From54To58 => "54 a 58",
            AgeBracket::From59Plus => "59 ou mais",
        };
        write!(f, "{}", label)
    }
}

// --- TABELA DE PREÇO ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PriceTable {
    pub id: Uuid,
    pub city_id: Uuid,
    pub carrier_id: Uuid,
    pub accommodation_id: Uuid,
    pub modality_id: Uuid,
    pub copay_type: CopayType,
    pub document_type: DocumentType,

    // Janela de vigência; a escolha da linha vigente continua manual.
    #[schema(value_type = String, format = Date)]
    pub valid_from: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub valid_until: NaiveDate,

    // Colunas de valor por faixa etária. Coluna ausente conta como zero.
    pub rate_00_18: Option<Decimal>,
    pub rate_19_23: Option<Decimal>,
    pub rate_24_28: Option<Decimal>,
    pub rate_29_33: Option<Decimal>,
    pub rate_34_38: Option<Decimal>,
    pub rate_39_43: Option<Decimal>,
    pub rate_44_48: Option<Decimal>,
    pub rate_49_53: Option<Decimal>,
    pub rate_54_58: Option<Decimal>,
    pub rate_59_plus: Option<Decimal>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PriceTable {
    /// O valor cadastrado para uma faixa, se houver.
    pub fn rate_for(&self, bracket: AgeBracket) -> Option<Decimal> {
        match bracket {
            AgeBracket::From00To18 => self.rate_00_18,
            AgeBracket::From19To23 => self.rate_19_23,
            AgeBracket::From24To28 => self.rate_24_28,
            AgeBracket::From29To33 => self.rate_29_33,
            AgeBracket::From34To38 => self.rate_34_38,
            AgeBracket::From39To43 => self.rate_39_43,
            AgeBracket::From44To48 => self.rate_44_48,
            AgeBracket::From49To53 => self.rate_49_53,
            AgeBracket::From54To58 => self.rate_54_58,
            AgeBracket::From59Plus => self.rate_59_plus,
        }
    }

    /// Soma o prêmio de cada idade pela sua faixa. Função pura: mesma
    /// entrada, mesmo total, em qualquer ponto que reexiba o valor.
    pub fn total_premium(&self, ages: &[i32]) -> Decimal {
        ages.iter()
            .map(|&age| self.rate_for(AgeBracket::for_age(age)).unwrap_or(Decimal::ZERO))
            .sum()
    }
}

// Linha da tabela de preço com os nomes dos cadastros, para listagem.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct PriceTableDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub table: PriceTable,

    pub city_name: String,
    pub city_state: String,
    pub carrier_name: String,
    pub accommodation_name: String,
    pub modality_name: String,
}

// Dados de cadastro/edição de uma tabela de preço. O mesmo formulário
// serve para criar e para atualizar, como na tela de origem.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_validity_window"))]
pub struct PriceTableForm {
    pub city_id: Uuid,
    pub carrier_id: Uuid,
    pub accommodation_id: Uuid,
    pub modality_id: Uuid,
    pub copay_type: CopayType,
    pub document_type: DocumentType,

    #[schema(value_type = String, format = Date)]
    pub valid_from: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub valid_until: NaiveDate,

    #[validate(custom(function = "validate_not_negative"))]
    pub rate_00_18: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub rate_19_23: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub rate_24_28: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub rate_29_33: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub rate_34_38: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub rate_39_43: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub rate_44_48: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub rate_49_53: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub rate_54_58: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub rate_59_plus: Option<Decimal>,
}

fn validate_not_negative(val: &Decimal) -> Result<(), validator::ValidationError> {
    if val.is_sign_negative() {
        let mut err = validator::ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_validity_window(form: &PriceTableForm) -> Result<(), validator::ValidationError> {
    if form.valid_from > form.valid_until {
        let mut err = validator::ValidationError::new("validity_window");
        err.message = Some("O início da vigência não pode ser posterior ao fim.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn table_with_rates(rates: [Option<Decimal>; 10]) -> PriceTable {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        PriceTable {
            id: Uuid::new_v4(),
            city_id: Uuid::new_v4(),
            carrier_id: Uuid::new_v4(),
            accommodation_id: Uuid::new_v4(),
            modality_id: Uuid::new_v4(),
            copay_type: CopayType::Full,
            document_type: DocumentType::Cpf,
            valid_from: today,
            valid_until: today,
            rate_00_18: rates[0],
            rate_19_23: rates[1],
            rate_24_28: rates[2],
            rate_29_33: rates[3],
            rate_34_38: rates[4],
            rate_39_43: rates[5],
            rate_44_48: rates[6],
            rate_49_53: rates[7],
            rate_54_58: rates[8],
            rate_59_plus: rates[9],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn bracket_boundaries_are_inclusive() {
        assert_eq!(AgeBracket::for_age(0), AgeBracket::From00To18);
        assert_eq!(AgeBracket::for_age(18), AgeBracket::From00To18);
        assert_eq!(AgeBracket::for_age(19), AgeBracket::From19To23);
        assert_eq!(AgeBracket::for_age(23), AgeBracket::From19To23);
        assert_eq!(AgeBracket::for_age(24), AgeBracket::From24To28);
        assert_eq!(AgeBracket::for_age(33), AgeBracket::From29To33);
        assert_eq!(AgeBracket::for_age(38), AgeBracket::From34To38);
        assert_eq!(AgeBracket::for_age(43), AgeBracket::From39To43);
        assert_eq!(AgeBracket::for_age(48), AgeBracket::From44To48);
        assert_eq!(AgeBracket::for_age(53), AgeBracket::From49To53);
        assert_eq!(AgeBracket::for_age(58), AgeBracket::From54To58);
        assert_eq!(AgeBracket::for_age(59), AgeBracket::From59Plus);
        assert_eq!(AgeBracket::for_age(107), AgeBracket::From59Plus);
    }

    #[test]
    fn brackets_are_exhaustive_and_contiguous() {
        let mut previous = AgeBracket::for_age(0);
        let mut changes = 0;
        for age in 1..=70 {
            let current = AgeBracket::for_age(age);
            if current != previous {
                changes += 1;
                previous = current;
            }
        }
        // Nove limites entre as dez faixas.
        assert_eq!(changes, 9);
    }

    #[test]
    fn bracket_labels() {
        assert_eq!(AgeBracket::From00To18.to_string(), "00 a 18");
        assert_eq!(AgeBracket::From59Plus.to_string(), "59 ou mais");
    }

    #[test]
    fn total_premium_sums_one_rate_per_age() {
        let mut rates = [None; 10];
        rates[0] = Some(dec("100.00"));
        rates[1] = Some(dec("150.00"));
        rates[9] = Some(dec("300.00"));
        let table = table_with_rates(rates);

        // Cenário do caderno: 10 → 00-18, 20 → 19-23, 60 → 59+.
        assert_eq!(table.total_premium(&[10, 20, 60]), dec("550.00"));
    }

    #[test]
    fn total_premium_treats_missing_rate_as_zero() {
        let mut rates = [None; 10];
        rates[0] = Some(dec("100.00"));
        let table = table_with_rates(rates);

        // 25 cai na faixa 24-28, que não tem valor cadastrado.
        assert_eq!(table.total_premium(&[10, 25]), dec("100.00"));
        assert_eq!(table_with_rates([None; 10]).total_premium(&[1, 2, 3]), Decimal::ZERO);
    }

    #[test]
    fn total_premium_counts_repeated_ages() {
        let mut rates = [None; 10];
        rates[0] = Some(dec("80.50"));
        let table = table_with_rates(rates);

        assert_eq!(table.total_premium(&[5, 5, 5]), dec("241.50"));
    }

    #[test]
    fn total_premium_is_deterministic() {
        let mut rates = [None; 10];
        rates[3] = Some(dec("199.90"));
        let table = table_with_rates(rates);

        let ages = [30, 31, 32];
        assert_eq!(table.total_premium(&ages), table.total_premium(&ages));
    }

    #[test]
    fn form_rejects_inverted_validity_window() {
        let mut form = sample_form();
        form.valid_from = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        form.valid_until = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(form.validate().is_err());

        form.valid_until = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn form_rejects_negative_rates() {
        let mut form = sample_form();
        form.rate_00_18 = Some(dec("-1.00"));
        assert!(form.validate().is_err());
    }

    fn sample_form() -> PriceTableForm {
        PriceTableForm {
            city_id: Uuid::new_v4(),
            carrier_id: Uuid::new_v4(),
            accommodation_id: Uuid::new_v4(),
            modality_id: Uuid::new_v4(),
            copay_type: CopayType::Full,
            document_type: DocumentType::Cpf,
            valid_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            valid_until: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            rate_00_18: Some(dec("100.00")),
            rate_19_23: None,
            rate_24_28: None,
            rate_29_33: None,
            rate_34_38: None,
            rate_39_43: None,
            rate_44_48: None,
            rate_49_53: None,
            rate_54_58: None,
            rate_59_plus: None,
        }
    }

    #[test]
    fn document_type_round_trips_wire_labels() {
        assert_eq!(serde_json::to_string(&DocumentType::Cpf).unwrap(), "\"CPF\"");
        assert_eq!(serde_json::from_str::<DocumentType>("\"CNPJ\"").unwrap(), DocumentType::Cnpj);
    }

    #[test]
    fn copay_type_round_trips_wire_labels() {
        assert_eq!(
            serde_json::to_string(&CopayType::Full).unwrap(),
            "\"Com Coparticipação\""
        );
        assert_eq!(
            serde_json::from_str::<CopayType>("\"Coparticipação Parcial\"").unwrap(),
            CopayType::Partial
        );
    }
}
