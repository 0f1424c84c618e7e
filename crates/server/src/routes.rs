use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::{pagination::Pagination, types::Health};

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod queues;
pub mod reservations;

/// Body returned by updates and deletes.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ack {
    pub data: bool,
}

impl Ack {
    pub const OK: Ack = Ack { data: true };
}

/// Optional paging on list endpoints; no `page` means the full list.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListQuery {
    pub fn pagination(&self) -> Option<Pagination> {
        self.page.map(|page| Pagination {
            page,
            per_page: self.per_page.unwrap_or(Pagination::default().per_page),
        })
    }
}

#[utoipa::path(get, path = "/healthz", tag = "health", responses((status = 200, description = "Service is up", body = String)))]
pub async fn healthz() -> &'static str {
    Health::OK.status
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: health, OpenAPI document and the `/api/v1` resources.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/queue", get(queues::list).post(queues::create))
        .route("/queue/:id", get(queues::get).put(queues::update).delete(queues::delete))
        .route("/queue/:id/reservation", get(reservations::list).post(reservations::create))
        .route(
            "/queue/:id/reservation/:rsvp",
            get(reservations::get).put(reservations::update).delete(reservations::delete),
        );

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api/v1", api)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                        // 5xx responses are logged at ERROR
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(cors),
        )
}
