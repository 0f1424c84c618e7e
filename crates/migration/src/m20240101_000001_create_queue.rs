//! Create `queue` table.
//!
//! Root entity; reservations reference it. `last_position` is the highest
//! position ever assigned in the queue.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Queue::Table)
                    .if_not_exists()
                    .col(pk_auto(Queue::Id))
                    .col(string_len(Queue::Name, 128).unique_key().not_null())
                    .col(integer(Queue::LastPosition).not_null().default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Queue::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Queue { Table, Id, Name, LastPosition }
