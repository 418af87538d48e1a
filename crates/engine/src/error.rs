//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`InvalidName`] returned when a fund name breaks the naming rules.
//! - [`InvalidCurrency`] returned when a currency code does not parse.
//! - [`KeyNotFound`] returned when a fund does not exist.
//!
//!  [`InvalidName`]: EngineError::InvalidName
//!  [`InvalidCurrency`]: EngineError::InvalidCurrency
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use sea_orm::DbErr;
use thiserror::Error;

use crate::CurrencyError;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid currency: {0}")]
    InvalidCurrency(#[from] CurrencyError),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidCurrency(a), Self::InvalidCurrency(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
