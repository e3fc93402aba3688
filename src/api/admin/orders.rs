use crate::api::{error_status, public_message};
use crate::auth::AdminPrincipal;
use crate::enums::admin::{AllOrdersResponse, OrdersOverview, UpdateStatusRequest};
use crate::enums::customer::OrderResponse;
use crate::services::order_lifecycle::{order_stats, OrderLifecycle};
use actix_web::{get, put, web, HttpResponse, Responder};

#[utoipa::path(
    get,
    tag = "Admin",
    path = "",
    responses(
        (status = 200, description = "All orders newest first, with counters", body = AllOrdersResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer" = [])),
    summary = "Order board"
)]
#[get("")]
pub(super) async fn get_all_orders(
    _admin: AdminPrincipal,
    lifecycle: web::Data<OrderLifecycle>,
) -> impl Responder {
    match lifecycle.list_orders() {
        Ok(orders) => {
            let stats = order_stats(&orders);
            HttpResponse::Ok().json(AllOrdersResponse {
                status: "ok".to_string(),
                data: Some(OrdersOverview { orders, stats }),
                error: None,
            })
        }
        Err(e) => {
            error!("ADMIN: get_all_orders(): {}", e);
            HttpResponse::build(error_status(&e)).json(AllOrdersResponse {
                status: "error".to_string(),
                data: None,
                error: Some(public_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    put,
    tag = "Admin",
    path = "/{order_id}/status",
    params(
        ("order_id", description = "Public order id"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = OrderResponse),
        (status = 404, description = "Unknown order", body = OrderResponse),
        (status = 409, description = "Transition not allowed", body = OrderResponse)
    ),
    security(("bearer" = [])),
    summary = "Move an order to a new status"
)]
#[put("/{order_id}/status")]
pub(super) async fn update_order_status(
    admin: AdminPrincipal,
    lifecycle: web::Data<OrderLifecycle>,
    path: web::Path<(String,)>,
    req_data: web::Json<UpdateStatusRequest>,
) -> impl Responder {
    let order_id = path.into_inner().0;
    let new_status = req_data.into_inner().status;
    match lifecycle.update_status(&order_id, new_status) {
        Ok(order) => {
            info!(
                "ADMIN: {} set order {} to {}",
                admin.username, order.order_id, order.status
            );
            HttpResponse::Ok().json(OrderResponse {
                status: "ok".to_string(),
                data: Some(order),
                error: None,
            })
        }
        Err(e) => {
            error!("ADMIN: update_order_status({}): {}", order_id, e);
            HttpResponse::build(error_status(&e)).json(OrderResponse {
                status: "error".to_string(),
                data: None,
                error: Some(public_message(&e)),
            })
        }
    }
}
