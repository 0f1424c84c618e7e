use sea_orm::{DatabaseConnection, EntityTrait, ActiveModelTrait, PaginatorTrait, QueryOrder, Set};
use tracing::info;

use common::pagination::Pagination;
use models::queue;
use crate::errors::ServiceError;
use crate::position_lock::PositionLocks;

/// Create a queue.
pub async fn create_queue(db: &DatabaseConnection, name: &str) -> Result<queue::Model, ServiceError> {
    let created = queue::create(db, name).await?;
    info!(queue_id = created.id, name = %created.name, "queue_created");
    Ok(created)
}

/// List queues ordered by id; the whole table unless a page is requested.
pub async fn list_queues(db: &DatabaseConnection, page: Option<Pagination>) -> Result<Vec<queue::Model>, ServiceError> {
    let select = queue::Entity::find().order_by_asc(queue::Column::Id);
    let rows = match page {
        Some(p) => {
            let (page_idx, per_page) = p.normalize();
            select.paginate(db, per_page).fetch_page(page_idx).await?
        }
        None => select.all(db).await?,
    };
    Ok(rows)
}

/// Get queue by id.
pub async fn get_queue(db: &DatabaseConnection, id: i32) -> Result<Option<queue::Model>, ServiceError> {
    Ok(queue::Entity::find_by_id(id).one(db).await?)
}

/// Update queue name.
pub async fn update_queue_name(db: &DatabaseConnection, id: i32, name: &str) -> Result<queue::Model, ServiceError> {
    queue::validate_name(name)?;
    let mut am: queue::ActiveModel = queue::Entity::find_by_id(id)
        .one(db).await?
        .ok_or_else(|| ServiceError::not_found("queue"))?
        .into();
    am.name = Set(name.to_string());
    let updated = am.update(db).await?;
    info!(queue_id = id, name = %updated.name, "queue_renamed");
    Ok(updated)
}

/// Hard delete queue; its reservations go with it. Returns whether a row existed.
pub async fn delete_queue(db: &DatabaseConnection, locks: &PositionLocks, id: i32) -> Result<bool, ServiceError> {
    let res = queue::Entity::delete_by_id(id).exec(db).await?;
    locks.forget(id);
    info!(queue_id = id, deleted = res.rows_affected, "queue_deleted");
    Ok(res.rows_affected > 0)
}
