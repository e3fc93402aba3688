use crate::enums::common::{ShopStatus, ShopStatusResponse};
use crate::services::catalog::Catalog;
use actix_web::{get, web, HttpResponse, Responder};

#[utoipa::path(
    get,
    tag = "Shop",
    path = "/status",
    responses(
        (status = 200, description = "Whether the shop takes orders right now", body = ShopStatusResponse)
    ),
    summary = "Shop open/closed flag"
)]
#[get("/status")]
pub(super) async fn get_shop_status(catalog: web::Data<Catalog>) -> impl Responder {
    let is_open = catalog.is_shop_open();
    HttpResponse::Ok().json(ShopStatusResponse {
        status: "ok".to_string(),
        data: ShopStatus { is_open },
        error: None,
    })
}
