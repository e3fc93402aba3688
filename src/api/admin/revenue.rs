use crate::api::{error_status, public_message};
use crate::auth::AdminPrincipal;
use crate::enums::admin::{RevenueQuery, RevenueResponse};
use crate::services::revenue::RevenueAggregator;
use actix_web::{get, web, HttpResponse, Responder};

#[utoipa::path(
    get,
    tag = "Admin",
    path = "/revenue",
    params(RevenueQuery),
    responses(
        (status = 200, description = "Today plus persisted days in range", body = RevenueResponse),
        (status = 400, description = "Unknown range", body = RevenueResponse)
    ),
    security(("bearer" = [])),
    summary = "Revenue dashboard"
)]
#[get("/revenue")]
pub(super) async fn get_revenue(
    _admin: AdminPrincipal,
    revenue: web::Data<RevenueAggregator>,
    query: web::Query<RevenueQuery>,
) -> impl Responder {
    let filter = match query.to_filter() {
        Ok(filter) => filter,
        Err(e) => {
            return HttpResponse::BadRequest().json(RevenueResponse {
                status: "error".to_string(),
                data: None,
                error: Some(e),
            })
        }
    };
    match revenue.revenue_summary(filter) {
        Ok(summary) => HttpResponse::Ok().json(RevenueResponse {
            status: "ok".to_string(),
            data: Some(summary),
            error: None,
        }),
        Err(e) => {
            error!("ADMIN: get_revenue(): {}", e);
            HttpResponse::build(error_status(&e)).json(RevenueResponse {
                status: "error".to_string(),
                data: None,
                error: Some(public_message(&e)),
            })
        }
    }
}
