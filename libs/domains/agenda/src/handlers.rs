use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get},
};
use axum_helpers::{
    JsonOrForm,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::AgendaResult;
use crate::models::{DeleteResult, Event, EventPayload, InsertResult, UpdateResult};
use crate::repository::EventRepository;
use crate::service::EventService;

/// OpenAPI documentation for the agenda events API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_events,
        get_event_by_id,
        get_events_by_title,
        get_events_by_price,
        create_event,
        update_event,
        delete_event,
    ),
    components(
        schemas(Event, EventPayload, InsertResult, UpdateResult, DeleteResult),
        responses(
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "AgendaEventos", description = "Agenda event endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the agenda events router
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_events).post(create_event).put(update_event))
        .route("/id/{id}", get(get_event_by_id))
        .route("/titulo/{titulo}", get(get_events_by_title))
        .route("/precos", get(get_events_by_price))
        .route("/{id}", delete(delete_event))
        .with_state(shared_service)
}

/// List every event, sorted by title
#[utoipa::path(
    get,
    path = "",
    tag = "AgendaEventos",
    responses(
        (status = 200, description = "Events sorted by titulo", body = Vec<Event>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
) -> AgendaResult<Json<Vec<Event>>> {
    Ok(Json(service.list_events().await?))
}

/// Find an event by id; the result holds zero or one event
#[utoipa::path(
    get,
    path = "/id/{id}",
    tag = "AgendaEventos",
    params(
        ("id" = String, Path, description = "Event ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Matching events", body = Vec<Event>),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event_by_id<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
) -> AgendaResult<Json<Vec<Event>>> {
    Ok(Json(service.find_by_id(&id).await?))
}

/// Case-insensitive title search
#[utoipa::path(
    get,
    path = "/titulo/{titulo}",
    tag = "AgendaEventos",
    params(
        ("titulo" = String, Path, description = "Fragment of the title, matched literally")
    ),
    responses(
        (status = 200, description = "Events whose titulo contains the fragment", body = Vec<Event>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_events_by_title<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(titulo): Path<String>,
) -> AgendaResult<Json<Vec<Event>>> {
    Ok(Json(service.find_by_title(&titulo).await?))
}

/// Events costing 100 to 900 dated in 2023
#[utoipa::path(
    get,
    path = "/precos",
    tag = "AgendaEventos",
    responses(
        (status = 200, description = "Events in the price window for the year", body = Vec<Event>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_events_by_price<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
) -> AgendaResult<Json<Vec<Event>>> {
    Ok(Json(service.find_by_price_and_year().await?))
}

/// Create an event
#[utoipa::path(
    post,
    path = "",
    tag = "AgendaEventos",
    request_body = EventPayload,
    responses(
        (status = 200, description = "Event inserted", body = InsertResult),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    JsonOrForm(payload): JsonOrForm<EventPayload>,
) -> AgendaResult<Json<InsertResult>> {
    Ok(Json(service.create_event(payload).await?))
}

/// Update the event named by `_id` in the body
#[utoipa::path(
    put,
    path = "",
    tag = "AgendaEventos",
    request_body = EventPayload,
    responses(
        (status = 200, description = "Update applied", body = UpdateResult),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    JsonOrForm(payload): JsonOrForm<EventPayload>,
) -> AgendaResult<Json<UpdateResult>> {
    Ok(Json(service.update_event(payload).await?))
}

/// Delete an event; an unknown id yields `deletedCount: 0`
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "AgendaEventos",
    params(
        ("id" = String, Path, description = "Event ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Delete applied", body = DeleteResult),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
) -> AgendaResult<Json<DeleteResult>> {
    Ok(Json(service.delete_event(&id).await?))
}
