//! Indexes backing the per-user date-window queries used by reports and
//! budget status.

use sea_orm_migration::prelude::*;

use crate::m20251230_000000_init::{Budgets, Expenses};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-user_id-date")
                    .table(Expenses::Table)
                    .col(Expenses::UserId)
                    .col(Expenses::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-budgets-user_id")
                    .table(Budgets::Table)
                    .col(Budgets::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx-budgets-user_id")
                    .table(Budgets::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx-expenses-user_id-date")
                    .table(Expenses::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
