use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reservation: one holder per position within a queue
        manager
            .create_index(
                Index::create()
                    .name("uniq_reservation_queue_position")
                    .table(Reservation::Table)
                    .col(Reservation::QueueId)
                    .col(Reservation::Position)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_reservation_queue_position").table(Reservation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reservation { Table, QueueId, Position }
