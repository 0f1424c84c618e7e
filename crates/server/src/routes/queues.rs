use axum::{extract::{Path, Query, State}, extract::rejection::{JsonRejection, QueryRejection}, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use service::queue_service;
use tracing::info;

use crate::{errors::{parse_id, JsonApiError}, routes::{Ack, ListQuery}, state::ServerState};

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct QueueInput {
    #[serde(default)]
    pub name: String,
}

#[utoipa::path(
    post, path = "/api/v1/queue", tag = "queue",
    request_body = QueueInput,
    responses(
        (status = 201, description = "Created", body = crate::openapi::QueueDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<QueueInput>, JsonRejection>,
) -> Result<(StatusCode, Json<models::queue::Model>), JsonApiError> {
    let Json(input) = payload?;
    info!(name = %input.name, "queue_create_request");
    match queue_service::create_queue(&state.db, &input.name).await {
        Ok(q) => Ok((StatusCode::CREATED, Json(q))),
        Err(e) => Err(JsonApiError::from_service(e, &input)),
    }
}

#[utoipa::path(
    get, path = "/api/v1/queue", tag = "queue",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::QueueDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<models::queue::Model>>, JsonApiError> {
    let Query(q) = query?;
    let list = queue_service::list_queues(&state.db, q.pagination()).await?;
    info!(count = list.len(), "list queues");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/api/v1/queue/{id}", tag = "queue",
    params(("id" = i32, Path, description = "Queue id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::QueueDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<models::queue::Model>, JsonApiError> {
    let id = parse_id(&id, "queue")?;
    queue_service::get_queue(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some("queue not found".into())))
}

#[utoipa::path(
    put, path = "/api/v1/queue/{id}", tag = "queue",
    params(("id" = i32, Path, description = "Queue id")),
    request_body = QueueInput,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AckDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<QueueInput>, JsonRejection>,
) -> Result<Json<Ack>, JsonApiError> {
    let id = parse_id(&id, "queue")?;
    let Json(input) = payload?;
    match queue_service::update_queue_name(&state.db, id, &input.name).await {
        Ok(_) => Ok(Json(Ack::OK)),
        Err(e) => Err(JsonApiError::from_service(e, &input)),
    }
}

#[utoipa::path(
    delete, path = "/api/v1/queue/{id}", tag = "queue",
    params(("id" = i32, Path, description = "Queue id")),
    responses(
        (status = 200, description = "Deleted, together with its reservations", body = crate::openapi::AckDoc),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, JsonApiError> {
    let id = parse_id(&id, "queue")?;
    queue_service::delete_queue(&state.db, &state.positions, id).await?;
    Ok(Json(Ack::OK))
}
