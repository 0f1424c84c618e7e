//! Reservation operations, including serialized position assignment.

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, instrument};

use common::pagination::Pagination;
use models::{queue, reservation};
use crate::errors::ServiceError;
use crate::position_lock::PositionLocks;

/// Fields of a reservation request.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub name: String,
    pub phone: String,
    pub group_size: Option<i32>,
}

/// Fields a reservation update may change; `name` is always rewritten.
#[derive(Debug, Clone)]
pub struct ReservationUpdate {
    pub name: String,
    pub phone: Option<String>,
    pub group_size: Option<i32>,
}

/// Next position given the queue's high-water mark and the largest position
/// still present. An empty, never-used queue starts at 1.
pub fn next_position(high_water: i32, max_existing: Option<i32>) -> i32 {
    high_water.max(max_existing.unwrap_or(0)) + 1
}

/// Append a reservation to a queue.
///
/// Holds the queue's position lock across one transaction that bumps the
/// queue's high-water mark, reads the current maximum position and inserts
/// the row. Any failure rolls the transaction back, so no row is left behind.
#[instrument(skip(db, locks, input), fields(queue_id = queue_id))]
pub async fn create_reservation(
    db: &DatabaseConnection,
    locks: &PositionLocks,
    queue_id: i32,
    input: NewReservation,
) -> Result<reservation::Model, ServiceError> {
    reservation::validate_name(&input.name)?;
    reservation::validate_phone(&input.phone)?;
    let group_size = reservation::normalize_group_size(input.group_size)?;

    let _guard = locks.acquire(queue_id).await;
    let txn = db.begin().await?;
    let created = match assign_and_insert(&txn, queue_id, &input, group_size).await {
        Ok(created) => created,
        Err(e) => {
            txn.rollback().await?;
            return Err(e);
        }
    };
    txn.commit().await?;

    info!(reservation_id = created.id, position = created.position, group_size, "reservation_created");
    Ok(created)
}

async fn assign_and_insert(
    txn: &DatabaseTransaction,
    queue_id: i32,
    input: &NewReservation,
    group_size: i32,
) -> Result<reservation::Model, ServiceError> {
    // Writing the queue row first takes the write lock and proves the queue exists.
    let bumped = queue::Entity::update_many()
        .col_expr(queue::Column::LastPosition, Expr::col(queue::Column::LastPosition).add(1))
        .filter(queue::Column::Id.eq(queue_id))
        .exec(txn)
        .await?;
    if bumped.rows_affected == 0 {
        return Err(ServiceError::not_found("queue"));
    }

    let counter: i32 = queue::Entity::find_by_id(queue_id)
        .select_only()
        .column(queue::Column::LastPosition)
        .into_tuple::<i32>()
        .one(txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("queue"))?;
    let max_existing: Option<i32> = reservation::Entity::find()
        .select_only()
        .column_as(reservation::Column::Position.max(), "max_position")
        .filter(reservation::Column::QueueId.eq(queue_id))
        .into_tuple::<Option<i32>>()
        .one(txn)
        .await?
        .flatten();

    let position = next_position(counter - 1, max_existing);
    if position != counter {
        queue::Entity::update_many()
            .col_expr(queue::Column::LastPosition, Expr::value(position))
            .filter(queue::Column::Id.eq(queue_id))
            .exec(txn)
            .await?;
    }

    Ok(reservation::insert_at(txn, queue_id, position, &input.name, &input.phone, group_size).await?)
}

/// List a queue's reservations in position order.
pub async fn list_reservations(
    db: &DatabaseConnection,
    queue_id: i32,
    page: Option<Pagination>,
) -> Result<Vec<reservation::Model>, ServiceError> {
    let select = reservation::Entity::find()
        .filter(reservation::Column::QueueId.eq(queue_id))
        .order_by_asc(reservation::Column::Position);
    let rows = match page {
        Some(p) => {
            let (page_idx, per_page) = p.normalize();
            select.paginate(db, per_page).fetch_page(page_idx).await?
        }
        None => select.all(db).await?,
    };
    Ok(rows)
}

pub async fn get_reservation(db: &DatabaseConnection, queue_id: i32, id: i32) -> Result<Option<reservation::Model>, ServiceError> {
    Ok(reservation::Entity::find_by_id(id)
        .filter(reservation::Column::QueueId.eq(queue_id))
        .one(db)
        .await?)
}

pub async fn update_reservation(
    db: &DatabaseConnection,
    queue_id: i32,
    id: i32,
    input: ReservationUpdate,
) -> Result<reservation::Model, ServiceError> {
    reservation::validate_name(&input.name)?;
    if let Some(phone) = input.phone.as_deref() {
        reservation::validate_phone(phone)?;
    }
    let group_size = input.group_size.map(|n| reservation::normalize_group_size(Some(n))).transpose()?;

    let mut am: reservation::ActiveModel = get_reservation(db, queue_id, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("reservation"))?
        .into();
    am.name = Set(input.name);
    if let Some(phone) = input.phone { am.phone = Set(phone); }
    if let Some(n) = group_size { am.group_size = Set(n); }
    let updated = am.update(db).await?;
    info!(queue_id, reservation_id = id, "reservation_updated");
    Ok(updated)
}

/// Delete one reservation. Positions of the others are left untouched.
pub async fn delete_reservation(db: &DatabaseConnection, queue_id: i32, id: i32) -> Result<bool, ServiceError> {
    let res = reservation::Entity::delete_many()
        .filter(reservation::Column::QueueId.eq(queue_id))
        .filter(reservation::Column::Id.eq(id))
        .exec(db)
        .await?;
    info!(queue_id, reservation_id = id, deleted = res.rows_affected, "reservation_deleted");
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::queue_service;
    use crate::test_support::{get_db, get_file_db};

    fn guest(n: usize) -> NewReservation {
        NewReservation {
            name: format!("Guest number {n}"),
            phone: format!("555-{n:06}"),
            group_size: None,
        }
    }

    #[test]
    fn next_position_rules() {
        assert_eq!(next_position(0, None), 1);
        assert_eq!(next_position(3, Some(3)), 4);
        assert_eq!(next_position(5, Some(2)), 6);
        assert_eq!(next_position(0, Some(4)), 5);
    }

    #[tokio::test]
    async fn sequential_creates_get_positions_one_to_n() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let locks = PositionLocks::new();
        let q = queue_service::create_queue(&db, "sequential queue").await?;

        for n in 1..=5 {
            let r = create_reservation(&db, &locks, q.id, guest(n)).await?;
            assert_eq!(r.position, n as i32);
            assert_eq!(r.group_size, 1);
        }
        let positions: Vec<i32> = list_reservations(&db, q.id, None).await?.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4, 5]);
        Ok(())
    }

    #[tokio::test]
    async fn positions_are_per_queue() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let locks = PositionLocks::new();
        let a = queue_service::create_queue(&db, "queue alpha").await?;
        let b = queue_service::create_queue(&db, "queue bravo").await?;

        assert_eq!(create_reservation(&db, &locks, a.id, guest(1)).await?.position, 1);
        assert_eq!(create_reservation(&db, &locks, a.id, guest(2)).await?.position, 2);
        assert_eq!(create_reservation(&db, &locks, b.id, guest(3)).await?.position, 1);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_creates_never_share_a_position() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let locks = Arc::new(PositionLocks::new());
        let q = queue_service::create_queue(&db, "concurrent queue").await?;

        let mut tasks = tokio::task::JoinSet::new();
        for n in 0..20 {
            let db = db.clone();
            let locks = Arc::clone(&locks);
            tasks.spawn(async move { create_reservation(&db, &locks, q.id, guest(n)).await });
        }
        let mut positions = Vec::new();
        while let Some(res) = tasks.join_next().await {
            positions.push(res??.position);
        }
        positions.sort_unstable();
        assert_eq!(positions, (1..=20).collect::<Vec<i32>>());
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_on_a_pooled_file_database() -> Result<(), anyhow::Error> {
        let (_dir, db) = get_file_db().await?;
        let locks = Arc::new(PositionLocks::new());
        let mut queue_ids = Vec::new();
        for n in 0..4 {
            queue_ids.push(queue_service::create_queue(&db, &format!("pooled queue {n}")).await?.id);
        }

        let mut tasks = tokio::task::JoinSet::new();
        for n in 0..100 {
            let db = db.clone();
            let locks = Arc::clone(&locks);
            let queue_id = queue_ids[n % queue_ids.len()];
            tasks.spawn(async move { create_reservation(&db, &locks, queue_id, guest(n)).await });
        }
        while let Some(res) = tasks.join_next().await {
            res??;
        }

        for queue_id in queue_ids {
            let positions: Vec<i32> = list_reservations(&db, queue_id, None).await?.iter().map(|r| r.position).collect();
            assert_eq!(positions, (1..=25).collect::<Vec<i32>>(), "queue {queue_id}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn deleted_tail_position_is_not_reused() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let locks = PositionLocks::new();
        let q = queue_service::create_queue(&db, "no reuse queue").await?;

        create_reservation(&db, &locks, q.id, guest(1)).await?;
        let second = create_reservation(&db, &locks, q.id, guest(2)).await?;
        assert!(delete_reservation(&db, q.id, second.id).await?);

        let third = create_reservation(&db, &locks, q.id, guest(3)).await?;
        assert_eq!(third.position, 3);
        Ok(())
    }

    #[tokio::test]
    async fn short_phone_is_rejected_without_a_row() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let locks = PositionLocks::new();
        let q = queue_service::create_queue(&db, "validation queue").await?;

        let bad = NewReservation { phone: "12345678".into(), ..guest(1) };
        assert!(matches!(create_reservation(&db, &locks, q.id, bad).await, Err(ServiceError::Validation(_))));
        assert!(list_reservations(&db, q.id, None).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn missing_queue_and_duplicate_phone_abort_cleanly() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let locks = PositionLocks::new();
        let q = queue_service::create_queue(&db, "failure queue").await?;

        assert!(matches!(create_reservation(&db, &locks, q.id + 42, guest(1)).await, Err(ServiceError::NotFound(_))));

        create_reservation(&db, &locks, q.id, guest(1)).await?;
        let dup = create_reservation(&db, &locks, q.id, guest(1)).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))), "got {dup:?}");

        // The failed attempt rolled back its counter bump as well.
        assert_eq!(create_reservation(&db, &locks, q.id, guest(2)).await?.position, 2);
        assert_eq!(list_reservations(&db, q.id, None).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn deleting_queue_cascades_to_reservations() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let locks = PositionLocks::new();
        let q = queue_service::create_queue(&db, "cascade queue").await?;
        let r = create_reservation(&db, &locks, q.id, guest(1)).await?;

        assert!(queue_service::delete_queue(&db, &locks, q.id).await?);
        assert!(get_reservation(&db, q.id, r.id).await?.is_none());
        assert!(list_reservations(&db, q.id, None).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_and_scope_by_queue() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let locks = PositionLocks::new();
        let q = queue_service::create_queue(&db, "update queue").await?;
        let other = queue_service::create_queue(&db, "other queue").await?;
        let r = create_reservation(&db, &locks, q.id, guest(1)).await?;

        let upd = ReservationUpdate { name: "Renamed Guest".into(), phone: None, group_size: Some(4) };
        let updated = update_reservation(&db, q.id, r.id, upd.clone()).await?;
        assert_eq!(updated.name, "Renamed Guest");
        assert_eq!(updated.group_size, 4);
        assert_eq!(updated.position, r.position);
        assert_eq!(updated.phone, r.phone);

        assert!(matches!(update_reservation(&db, other.id, r.id, upd).await, Err(ServiceError::NotFound(_))));
        assert!(get_reservation(&db, other.id, r.id).await?.is_none());
        assert!(!delete_reservation(&db, other.id, r.id).await?);
        Ok(())
    }
}
