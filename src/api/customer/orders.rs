use crate::api::{error_status, public_message};
use crate::enums::customer::{CheckoutRequest, OrderResponse};
use crate::services::order_lifecycle::OrderLifecycle;
use actix_web::{get, post, web, HttpResponse, Responder};

#[utoipa::path(
    post,
    tag = "Orders",
    path = "/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Missing checkout field", body = OrderResponse),
        (status = 409, description = "Shop is closed", body = OrderResponse)
    ),
    summary = "Place an order for the submitted cart"
)]
#[post("/checkout")]
pub(super) async fn checkout(
    lifecycle: web::Data<OrderLifecycle>,
    req_data: web::Json<CheckoutRequest>,
) -> impl Responder {
    let CheckoutRequest { items, customer } = req_data.into_inner();
    match lifecycle.place_order(&items, &customer) {
        Ok(order) => HttpResponse::Ok().json(OrderResponse {
            status: "ok".to_string(),
            data: Some(order),
            error: None,
        }),
        Err(e) => {
            error!("ORDER: checkout(): {}", e);
            HttpResponse::build(error_status(&e)).json(OrderResponse {
                status: "error".to_string(),
                data: None,
                error: Some(public_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    get,
    tag = "Orders",
    path = "/track/{order_id}",
    params(
        ("order_id", description = "Order id as printed on the receipt, any case"),
    ),
    responses(
        (status = 200, description = "Current order state", body = OrderResponse),
        (status = 404, description = "Order not found", body = OrderResponse)
    ),
    summary = "Track an order"
)]
#[get("/track/{order_id}")]
pub(super) async fn track_order(
    lifecycle: web::Data<OrderLifecycle>,
    path: web::Path<(String,)>,
) -> impl Responder {
    let raw_id = path.into_inner().0;
    match lifecycle.track_order(&raw_id) {
        Ok(order) => HttpResponse::Ok().json(OrderResponse {
            status: "ok".to_string(),
            data: Some(order),
            error: None,
        }),
        Err(e) => {
            debug!("ORDER: track_order({}): {}", raw_id, e);
            let message = match e {
                crate::services::errors::ShopError::NotFound(_) => "Order not found".to_string(),
                ref other => public_message(other),
            };
            HttpResponse::build(error_status(&e)).json(OrderResponse {
                status: "error".to_string(),
                data: None,
                error: Some(message),
            })
        }
    }
}
