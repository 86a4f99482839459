//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`errors`]**: the `{"errors": [{value, msg, param}]}` envelope and [`AppError`]
//! - **[`extractors`]**: [`JsonOrForm`], a JSON or urlencoded body extractor that rejects with the envelope

pub mod errors;
pub mod extractors;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

pub use errors::{AppError, ErrorCode, ErrorDetail, ErrorResponse};

pub use extractors::JsonOrForm;
