//! Accounting domain of OpenAcct.
//!
//! The crate owns the [`Currency`] value type, the [`Fund`] entity and the
//! [`Engine`], a SeaORM store implementing [`FundRepository`].

pub use currency::{Currency, CurrencyError, CurrencyInfo};
pub use error::EngineError;
pub use funds::{Fund, FundRepository, normalize_fund_name};
pub use ops::{Engine, EngineBuilder};

mod currency;
mod error;
pub mod funds;
mod ops;

pub type ResultEngine<T> = Result<T, EngineError>;
