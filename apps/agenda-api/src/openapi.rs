//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agenda Eventos API",
        version = "1.0.0",
        description = "REST API for the Fatec agenda of events, backed by MongoDB"
    ),
    servers(
        (url = "http://localhost:4000", description = "Local development server")
    ),
    nest(
        (path = "/api/AgendaEventos", api = domain_agenda::ApiDoc)
    ),
    tags(
        (name = "AgendaEventos", description = "Agenda event endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
