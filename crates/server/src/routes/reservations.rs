use axum::{extract::{Path, Query, State}, extract::rejection::{JsonRejection, QueryRejection}, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use service::reservation_service::{self, NewReservation, ReservationUpdate};
use tracing::info;

use crate::{errors::{parse_id, JsonApiError}, routes::{Ack, ListQuery}, state::ServerState};

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateReservationInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub groupsize: Option<i32>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateReservationInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub groupsize: Option<i32>,
}

fn not_found() -> JsonApiError {
    JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some("reservation not found".into()))
}

#[utoipa::path(
    post, path = "/api/v1/queue/{id}/reservation", tag = "reservation",
    params(("id" = i32, Path, description = "Queue id")),
    request_body = CreateReservationInput,
    responses(
        (status = 201, description = "Created with its assigned position", body = crate::openapi::ReservationDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Queue Not Found"),
        (status = 409, description = "Phone already registered")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<CreateReservationInput>, JsonRejection>,
) -> Result<(StatusCode, Json<models::reservation::Model>), JsonApiError> {
    let queue_id = parse_id(&id, "queue")?;
    let Json(input) = payload?;
    let req = NewReservation { name: input.name.clone(), phone: input.phone.clone(), group_size: input.groupsize };
    match reservation_service::create_reservation(&state.db, &state.positions, queue_id, req).await {
        Ok(r) => {
            info!(queue_id, reservation_id = r.id, position = r.position, "created reservation");
            Ok((StatusCode::CREATED, Json(r)))
        }
        Err(e) => Err(JsonApiError::from_service(e, &input)),
    }
}

#[utoipa::path(
    get, path = "/api/v1/queue/{id}/reservation", tag = "reservation",
    params(("id" = i32, Path, description = "Queue id"), ListQuery),
    responses(
        (status = 200, description = "List OK, in position order", body = [crate::openapi::ReservationDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<models::reservation::Model>>, JsonApiError> {
    let queue_id = parse_id(&id, "queue")?;
    let Query(q) = query?;
    let list = reservation_service::list_reservations(&state.db, queue_id, q.pagination()).await?;
    info!(queue_id, count = list.len(), "list reservations");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/api/v1/queue/{id}/reservation/{rsvp}", tag = "reservation",
    params(("id" = i32, Path, description = "Queue id"), ("rsvp" = i32, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ReservationDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path((id, rsvp)): Path<(String, String)>,
) -> Result<Json<models::reservation::Model>, JsonApiError> {
    let queue_id = parse_id(&id, "queue")?;
    let rsvp = parse_id(&rsvp, "reservation")?;
    reservation_service::get_reservation(&state.db, queue_id, rsvp)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

#[utoipa::path(
    put, path = "/api/v1/queue/{id}/reservation/{rsvp}", tag = "reservation",
    params(("id" = i32, Path, description = "Queue id"), ("rsvp" = i32, Path, description = "Reservation id")),
    request_body = UpdateReservationInput,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AckDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path((id, rsvp)): Path<(String, String)>,
    payload: Result<Json<UpdateReservationInput>, JsonRejection>,
) -> Result<Json<Ack>, JsonApiError> {
    let queue_id = parse_id(&id, "queue")?;
    let rsvp = parse_id(&rsvp, "reservation")?;
    let Json(input) = payload?;
    let upd = ReservationUpdate { name: input.name.clone(), phone: input.phone.clone(), group_size: input.groupsize };
    match reservation_service::update_reservation(&state.db, queue_id, rsvp, upd).await {
        Ok(_) => Ok(Json(Ack::OK)),
        Err(e) => Err(JsonApiError::from_service(e, &input)),
    }
}

#[utoipa::path(
    delete, path = "/api/v1/queue/{id}/reservation/{rsvp}", tag = "reservation",
    params(("id" = i32, Path, description = "Queue id"), ("rsvp" = i32, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::AckDoc),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path((id, rsvp)): Path<(String, String)>,
) -> Result<Json<Ack>, JsonApiError> {
    let queue_id = parse_id(&id, "queue")?;
    let rsvp = parse_id(&rsvp, "reservation")?;
    reservation_service::delete_reservation(&state.db, queue_id, rsvp).await?;
    Ok(Json(Ack::OK))
}
