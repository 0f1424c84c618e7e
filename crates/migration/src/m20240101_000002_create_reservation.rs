//! Create `reservation` table.
//! One row per place in a queue; removed together with its queue.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservation::Table)
                    .if_not_exists()
                    .col(pk_auto(Reservation::Id))
                    .col(integer(Reservation::QueueId).not_null())
                    .col(integer(Reservation::Position).not_null())
                    .col(string_len(Reservation::Name, 128).not_null())
                    .col(string_len(Reservation::Phone, 32).unique_key().not_null())
                    .col(integer(Reservation::GroupSize).not_null().default(1))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_queue")
                            .from(Reservation::Table, Reservation::QueueId)
                            .to(Queue::Table, Queue::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Reservation::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Reservation {
    Table,
    Id,
    QueueId,
    Position,
    Name,
    Phone,
    GroupSize,
}

#[derive(DeriveIden)]
enum Queue { Table, Id }
