use crate::api::{error_status, public_message};
use crate::auth::AdminPrincipal;
use crate::enums::admin::SetShopRequest;
use crate::enums::common::{GeneralResponse, ShopStatus, ShopStatusResponse};
use crate::services::catalog::Catalog;
use actix_web::{put, web, HttpResponse, Responder};

#[utoipa::path(
    put,
    tag = "Admin",
    path = "/shop",
    request_body = SetShopRequest,
    responses(
        (status = 200, description = "Shop flag stored", body = ShopStatusResponse),
        (status = 500, description = "Settings could not be written", body = GeneralResponse)
    ),
    security(("bearer" = [])),
    summary = "Open or close the shop"
)]
#[put("/shop")]
pub(super) async fn set_shop_status(
    admin: AdminPrincipal,
    catalog: web::Data<Catalog>,
    req_data: web::Json<SetShopRequest>,
) -> impl Responder {
    match catalog.set_shop_open(req_data.is_open) {
        Ok(settings) => {
            info!("ADMIN: {} set shop open = {}", admin.username, settings.is_open);
            HttpResponse::Ok().json(ShopStatusResponse {
                status: "ok".to_string(),
                data: ShopStatus {
                    is_open: settings.is_open,
                },
                error: None,
            })
        }
        Err(e) => {
            error!("ADMIN: set_shop_status(): {}", e);
            HttpResponse::build(error_status(&e)).json(GeneralResponse::error(public_message(&e)))
        }
    }
}
