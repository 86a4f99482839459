//! Wires the agenda domain to HTTP routes.

use axum::Router;
use domain_agenda::{EventService, MongoEventRepository, handlers};
use std::sync::Arc;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoEventRepository::new(Arc::clone(&state.db));
    handlers::router(EventService::new(repository))
}
