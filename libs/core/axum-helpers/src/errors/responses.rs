//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "errors": [{
            "value": "Kind: Server selection timeout",
            "msg": "Erro ao acessar a agenda de eventos",
            "param": "database"
        }]
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "errors": [{
            "value": "1234",
            "msg": "O número de registro deve conter exatamente 8 dígitos",
            "param": "n_registro"
        }]
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid ObjectId",
    content_type = "application/json",
    example = json!({
        "errors": [{
            "value": "not-an-objectid",
            "msg": "Identificador inválido: invalid hex string",
            "param": "id"
        }]
    })
)]
pub struct BadRequestObjectIdResponse(pub ErrorResponse);
