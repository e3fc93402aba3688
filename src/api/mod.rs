pub mod admin;
pub mod customer;
mod errors;

use crate::AppState;
use actix_web::{get, HttpResponse, Responder};
pub(crate) use errors::{default_error_handler, error_status, public_message, query_error_handler};
use utoipa_actix_web::service_config::ServiceConfig;

#[utoipa::path(
    get,
    tag = "Health",
    path = "/",
    responses(
        (status = 200, description = "Server is running")
    ),
    summary = "Liveness check"
)]
#[get("/")]
async fn root_endpoint() -> impl Responder {
    HttpResponse::Ok().body("Server up!")
}

pub fn configure(cfg: &mut ServiceConfig, state: &AppState) {
    cfg.service(root_endpoint);
    customer::config(cfg, state);
    admin::config(cfg, state);
}
