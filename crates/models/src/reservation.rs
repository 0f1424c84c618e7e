use sea_orm::{entity::prelude::*, ActiveValue::NotSet, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, check_min_len, MIN_NAME_LEN, MIN_PHONE_LEN};
use crate::queue;

pub const DEFAULT_GROUP_SIZE: i32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[serde(rename = "queueid")]
    pub queue_id: i32,
    pub position: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub phone: String,
    #[serde(rename = "groupsize")]
    pub group_size: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Queue }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Queue => Entity::belongs_to(queue::Entity)
                .from(Column::QueueId)
                .to(queue::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<queue::Entity> for Entity {
    fn to() -> RelationDef { Relation::Queue.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    check_min_len("name", name, MIN_NAME_LEN)
}

pub fn validate_phone(phone: &str) -> Result<(), errors::ModelError> {
    check_min_len("phone", phone, MIN_PHONE_LEN)
}

/// Absent or zero means a party of one; negative sizes are rejected.
pub fn normalize_group_size(size: Option<i32>) -> Result<i32, errors::ModelError> {
    match size {
        None | Some(0) => Ok(DEFAULT_GROUP_SIZE),
        Some(n) if n > 0 => Ok(n),
        Some(_) => Err(errors::ModelError::Validation("groupsize must be positive".into())),
    }
}

/// Insert a reservation at an already-assigned position.
///
/// Callers are responsible for choosing `position`; see the service layer's
/// position assignment for the serialized path.
pub async fn insert_at<C: ConnectionTrait>(
    db: &C,
    queue_id: i32,
    position: i32,
    name: &str,
    phone: &str,
    group_size: i32,
) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    validate_phone(phone)?;
    let am = ActiveModel {
        id: NotSet,
        queue_id: Set(queue_id),
        position: Set(position),
        name: Set(name.to_string()),
        phone: Set(phone.to_string()),
        group_size: Set(group_size),
    };
    Ok(am.insert(db).await?)
}
