use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct QueueDoc { pub id: i32, pub name: String }

#[derive(ToSchema)]
pub struct ReservationDoc {
    pub id: i32,
    pub queueid: i32,
    pub position: i32,
    pub name: String,
    pub phone: String,
    pub groupsize: i32,
}

#[derive(ToSchema)]
pub struct AckDoc { pub data: bool }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::healthz,
        crate::routes::queues::create,
        crate::routes::queues::list,
        crate::routes::queues::get,
        crate::routes::queues::update,
        crate::routes::queues::delete,
        crate::routes::reservations::create,
        crate::routes::reservations::list,
        crate::routes::reservations::get,
        crate::routes::reservations::update,
        crate::routes::reservations::delete,
    ),
    components(
        schemas(
            QueueDoc,
            ReservationDoc,
            AckDoc,
            crate::routes::queues::QueueInput,
            crate::routes::reservations::CreateReservationInput,
            crate::routes::reservations::UpdateReservationInput,
        )
    ),
    tags(
        (name = "health"),
        (name = "queue"),
        (name = "reservation")
    )
)]
pub struct ApiDoc;
