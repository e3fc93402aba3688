use crate::api::{error_status, public_message};
use crate::enums::customer::{DishListResponse, DishResponse, FeaturedQuery, MenuQuery};
use crate::models::catalog::{DishFilter, DishView};
use crate::services::catalog::{Catalog, FEATURED_LIMIT};
use actix_web::{get, web, HttpResponse, Responder};

#[utoipa::path(
    get,
    tag = "Menu",
    path = "",
    params(MenuQuery),
    responses(
        (status = 200, description = "Dishes matching the filter", body = DishListResponse),
        (status = 500, description = "Catalog unavailable", body = DishListResponse)
    ),
    summary = "Browse the menu"
)]
#[get("")]
pub(super) async fn list_menu(
    catalog: web::Data<Catalog>,
    query: web::Query<MenuQuery>,
) -> impl Responder {
    let MenuQuery { category, in_stock } = query.into_inner();
    let filter = DishFilter {
        category,
        in_stock_only: in_stock.unwrap_or(false),
    };
    match catalog.list_dishes(&filter) {
        Ok(dishes) => HttpResponse::Ok().json(DishListResponse {
            status: "ok".to_string(),
            data: dishes.into_iter().map(DishView::from).collect(),
            error: None,
        }),
        Err(e) => {
            error!("MENU: list_menu(): {}", e);
            HttpResponse::build(error_status(&e)).json(DishListResponse {
                status: "error".to_string(),
                data: Vec::new(),
                error: Some(public_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    get,
    tag = "Menu",
    path = "/featured",
    params(FeaturedQuery),
    responses(
        (status = 200, description = "In-stock dishes for the home page", body = DishListResponse)
    ),
    summary = "Featured dishes"
)]
#[get("/featured")]
pub(super) async fn list_featured(
    catalog: web::Data<Catalog>,
    query: web::Query<FeaturedQuery>,
) -> impl Responder {
    let limit = query.limit.unwrap_or(FEATURED_LIMIT);
    match catalog.featured_dishes(limit) {
        Ok(dishes) => HttpResponse::Ok().json(DishListResponse {
            status: "ok".to_string(),
            data: dishes.into_iter().map(DishView::from).collect(),
            error: None,
        }),
        Err(e) => {
            error!("MENU: list_featured(): {}", e);
            HttpResponse::build(error_status(&e)).json(DishListResponse {
                status: "error".to_string(),
                data: Vec::new(),
                error: Some(public_message(&e)),
            })
        }
    }
}

#[utoipa::path(
    get,
    tag = "Menu",
    path = "/{id}",
    params(
        ("id", description = "Dish id"),
    ),
    responses(
        (status = 200, description = "Dish found", body = DishResponse),
        (status = 404, description = "No such dish", body = DishResponse)
    ),
    summary = "Fetch a single dish"
)]
#[get("/{id}")]
pub(super) async fn get_dish(catalog: web::Data<Catalog>, path: web::Path<(i32,)>) -> impl Responder {
    let id = path.into_inner().0;
    match catalog.get_dish(id) {
        Ok(dish) => HttpResponse::Ok().json(DishResponse {
            status: "ok".to_string(),
            data: Some(dish.into()),
            error: None,
        }),
        Err(e) => {
            debug!("MENU: get_dish({}): {}", id, e);
            HttpResponse::build(error_status(&e)).json(DishResponse {
                status: "error".to_string(),
                data: None,
                error: Some(public_message(&e)),
            })
        }
    }
}
