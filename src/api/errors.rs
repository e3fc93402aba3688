use crate::services::errors::ShopError;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::enums::common::GeneralResponse;

pub(crate) fn default_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    error!("Error in request: {} \n Error: {}", req.full_url(), err);
    let body = GeneralResponse::error(err.to_string());
    actix_web::error::InternalError::from_response(err, HttpResponse::BadRequest().json(body))
        .into()
}

pub(crate) fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    error!("Error in query: {} \n Error: {}", req.full_url(), err);
    let body = GeneralResponse::error(err.to_string());
    actix_web::error::InternalError::from_response(err, HttpResponse::BadRequest().json(body))
        .into()
}

pub(crate) fn error_status(err: &ShopError) -> StatusCode {
    match err {
        ShopError::Validation { .. } => StatusCode::BAD_REQUEST,
        ShopError::NotFound(_) => StatusCode::NOT_FOUND,
        ShopError::InvalidTransition { .. } => StatusCode::CONFLICT,
        ShopError::ShopClosed => StatusCode::CONFLICT,
        ShopError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ShopError::Upload(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Message shown to clients. Storage details stay in the log.
pub(crate) fn public_message(err: &ShopError) -> String {
    match err {
        ShopError::Backend(_) => "Something went wrong, please try again".to_string(),
        ShopError::NotFound(_) => "Not found".to_string(),
        other => other.to_string(),
    }
}
