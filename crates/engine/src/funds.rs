//! The module contains the `Fund` struct, its storage model and the
//! `FundRepository` trait.

use async_trait::async_trait;
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{Currency, EngineError, ResultEngine};

/// Punctuation accepted in a fund name besides letters, digits and spaces.
const NAME_PUNCTUATION: &[char] = &['-', '_', '.', ',', '\'', '&', '(', ')'];

/// A fund.
///
/// A fund is a named collection of accounts, all of which are denominated in
/// the same currency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fund {
    /// Identifier assigned by the store.
    pub id: i32,
    pub name: String,
    pub currency: Currency,
}

/// Access to the funds held by a store.
#[async_trait]
pub trait FundRepository: Send + Sync {
    /// Every fund, ordered by id.
    async fn all(&self) -> ResultEngine<Vec<Fund>>;

    /// Validate `name` and `currency`, store a new fund and return it with
    /// its id. Only currencies from the table are accepted.
    async fn create(&self, name: &str, currency: Currency) -> ResultEngine<Fund>;

    async fn get(&self, id: i32) -> ResultEngine<Fund>;

    async fn delete(&self, id: i32) -> ResultEngine<()>;
}

/// Trim a fund name and check it against the naming rules.
///
/// A name must contain at least one letter or digit and may otherwise only
/// contain spaces and `- _ . , ' & ( )`.
pub fn normalize_fund_name(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(
            "fund name must not be empty".to_string(),
        ));
    }
    if !trimmed.chars().any(char::is_alphanumeric) {
        return Err(EngineError::InvalidName(format!(
            "fund name '{trimmed}' must contain a letter or a digit"
        )));
    }
    if let Some(invalid) = trimmed
        .chars()
        .find(|&c| !(c.is_alphanumeric() || c == ' ' || NAME_PUNCTUATION.contains(&c)))
    {
        return Err(EngineError::InvalidName(format!(
            "fund name '{trimmed}' contains invalid character '{invalid}'"
        )));
    }
    Ok(trimmed.to_string())
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "funds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Index of the currency in the currency table.
    pub currency: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Fund {
    /// A stored currency index outside the table becomes an unrecognized
    /// `Currency` rather than an error.
    fn from(value: Model) -> Self {
        let index = u16::try_from(value.currency).unwrap_or(u16::MAX);
        Self {
            id: value.id,
            name: value.name,
            currency: Currency::from_index(index),
        }
    }
}

impl From<&Fund> for ActiveModel {
    fn from(value: &Fund) -> Self {
        Self {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(value.name.clone()),
            currency: ActiveValue::Set(i32::from(value.currency.index())),
        }
    }
}
