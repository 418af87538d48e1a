//! Creates the `funds` table.
//!
//! `currency` holds the index of the fund's currency in the engine's currency
//! table, not the ISO code.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Funds {
    Table,
    Id,
    Name,
    Currency,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Funds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Funds::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Funds::Name).string().not_null())
                    .col(ColumnDef::new(Funds::Currency).integer().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Funds::Table).to_owned())
            .await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, Database, Statement};

    use super::*;
    use crate::Migrator;

    #[tokio::test]
    async fn up_creates_funds_table_and_down_drops_it() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let manager = SchemaManager::new(&db);
        assert!(manager.has_table("funds").await.unwrap());

        let backend = db.get_database_backend();
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO funds (name, currency) VALUES (?, ?)",
            vec!["General".into(), 26.into()],
        ))
        .await
        .unwrap();

        Migrator::down(&db, None).await.unwrap();
        assert!(!manager.has_table("funds").await.unwrap());
    }
}
