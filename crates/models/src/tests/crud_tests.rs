use crate::db::connect_in_memory;
use crate::errors::ModelError;
use crate::{queue, reservation};
use anyhow::Result;
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};

/// Test queue CRUD operations
#[tokio::test]
async fn test_queue_crud() -> Result<()> {
    let db = connect_in_memory().await?;

    let created = queue::create(&db, "morning line").await?;
    assert_eq!(created.name, "morning line");
    assert_eq!(created.last_position, 0);

    let found = queue::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found, Some(created.clone()));

    let by_name = queue::Entity::find()
        .filter(queue::Column::Name.eq("morning line"))
        .one(&db)
        .await?;
    assert_eq!(by_name.map(|q| q.id), Some(created.id));

    queue::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(queue::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_queue_name_rules() -> Result<()> {
    let db = connect_in_memory().await?;

    assert!(matches!(queue::create(&db, "short").await, Err(ModelError::Validation(_))));

    queue::create(&db, "evening line").await?;
    let dup = queue::create(&db, "evening line").await;
    assert!(matches!(dup, Err(ModelError::Conflict(_))), "got {dup:?}");
    Ok(())
}

/// Test reservation rows and the relation back to their queue
#[tokio::test]
async fn test_reservation_crud_and_relation() -> Result<()> {
    let db = connect_in_memory().await?;
    let q = queue::create(&db, "lunch counter").await?;

    let first = reservation::insert_at(&db, q.id, 1, "Alice Example", "555-000-001", 2).await?;
    let second = reservation::insert_at(&db, q.id, 2, "Bobby Example", "555-000-002", 1).await?;
    assert_eq!(first.queue_id, q.id);

    let listed = q
        .find_related(reservation::Entity)
        .order_by_asc(reservation::Column::Position)
        .all(&db)
        .await?;
    assert_eq!(listed, vec![first.clone(), second]);

    let owner = first.find_related(queue::Entity).one(&db).await?;
    assert_eq!(owner.map(|o| o.id), Some(q.id));
    Ok(())
}

#[tokio::test]
async fn test_reservation_constraints() -> Result<()> {
    let db = connect_in_memory().await?;
    let q = queue::create(&db, "dinner service").await?;

    reservation::insert_at(&db, q.id, 1, "Alice Example", "555-000-001", 1).await?;

    let same_phone = reservation::insert_at(&db, q.id, 2, "Carol Example", "555-000-001", 1).await;
    assert!(matches!(same_phone, Err(ModelError::Conflict(_))), "got {same_phone:?}");

    let same_position = reservation::insert_at(&db, q.id, 1, "Carol Example", "555-000-003", 1).await;
    assert!(matches!(same_position, Err(ModelError::Conflict(_))), "got {same_position:?}");

    let orphan = reservation::insert_at(&db, q.id + 100, 1, "Carol Example", "555-000-004", 1).await;
    assert!(matches!(orphan, Err(ModelError::Db(_))), "got {orphan:?}");
    Ok(())
}

#[tokio::test]
async fn test_queue_delete_cascades() -> Result<()> {
    let db = connect_in_memory().await?;
    let q = queue::create(&db, "brunch tables").await?;
    reservation::insert_at(&db, q.id, 1, "Alice Example", "555-000-001", 1).await?;
    reservation::insert_at(&db, q.id, 2, "Bobby Example", "555-000-002", 3).await?;

    queue::Entity::delete_by_id(q.id).exec(&db).await?;

    let left = reservation::Entity::find()
        .filter(reservation::Column::QueueId.eq(q.id))
        .all(&db)
        .await?;
    assert!(left.is_empty());
    Ok(())
}
