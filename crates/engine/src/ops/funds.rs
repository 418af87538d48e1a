use async_trait::async_trait;
use sea_orm::{QueryOrder, TransactionTrait, prelude::*};

use crate::{Currency, CurrencyError, EngineError, Fund, FundRepository, ResultEngine, funds, normalize_fund_name};

use super::{Engine, with_tx};

fn fund_not_found(id: i32) -> EngineError {
    EngineError::KeyNotFound(format!("fund {id}"))
}

#[async_trait]
impl FundRepository for Engine {
    async fn all(&self) -> ResultEngine<Vec<Fund>> {
        let models = funds::Entity::find()
            .order_by_asc(funds::Column::Id)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(Fund::from).collect())
    }

    async fn create(&self, name: &str, currency: Currency) -> ResultEngine<Fund> {
        let name = normalize_fund_name(name)?;
        // Only currencies from the table are stored.
        if !currency.is_known() {
            return Err(CurrencyError::Unknown(format!("#{}", currency.index())).into());
        }
        let fund = Fund {
            id: 0,
            name,
            currency,
        };

        let model = funds::ActiveModel::from(&fund)
            .insert(&self.database)
            .await?;

        Ok(Fund::from(model))
    }

    async fn get(&self, id: i32) -> ResultEngine<Fund> {
        funds::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(Fund::from)
            .ok_or_else(|| fund_not_found(id))
    }

    async fn delete(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = funds::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| fund_not_found(id))?;
            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}
