use crate::api::{error_status, public_message};
use crate::auth::AdminPrincipal;
use crate::enums::admin::{CreateDishRequest, ImagePayload};
use crate::enums::common::GeneralResponse;
use crate::enums::customer::DishResponse;
use crate::models::catalog::{DishPatch, ImageUpload};
use crate::services::catalog::Catalog;
use crate::services::errors::ShopError;
use actix_web::{delete, post, put, web, HttpResponse, Responder};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

fn decode_image(payload: ImagePayload) -> Result<ImageUpload, ShopError> {
    let bytes = STANDARD.decode(payload.data_base64.trim()).map_err(|e| {
        debug!("decode_image: {} is not valid base64: {}", payload.file_name, e);
        ShopError::missing("image")
    })?;
    Ok(ImageUpload {
        file_name: payload.file_name,
        content_type: payload.content_type,
        bytes,
    })
}

fn dish_error(e: &ShopError) -> HttpResponse {
    HttpResponse::build(error_status(e)).json(DishResponse {
        status: "error".to_string(),
        data: None,
        error: Some(public_message(e)),
    })
}

#[utoipa::path(
    post,
    tag = "Admin",
    path = "",
    request_body = CreateDishRequest,
    responses(
        (status = 200, description = "Dish created in stock", body = DishResponse),
        (status = 400, description = "Missing field or image", body = DishResponse),
        (status = 502, description = "Image upload failed", body = DishResponse)
    ),
    security(("bearer" = [])),
    summary = "Add a dish with its image"
)]
#[post("")]
pub(super) async fn create_dish(
    _admin: AdminPrincipal,
    catalog: web::Data<Catalog>,
    req_data: web::Json<CreateDishRequest>,
) -> impl Responder {
    let CreateDishRequest { dish, image } = req_data.into_inner();
    let image = match image.map(decode_image).transpose() {
        Ok(image) => image,
        Err(e) => return dish_error(&e),
    };
    match catalog.add_dish(dish, image).await {
        Ok(dish) => HttpResponse::Ok().json(DishResponse {
            status: "ok".to_string(),
            data: Some(dish.into()),
            error: None,
        }),
        Err(e) => {
            error!("ADMIN: create_dish(): {}", e);
            dish_error(&e)
        }
    }
}

#[utoipa::path(
    put,
    tag = "Admin",
    path = "/{id}",
    params(
        ("id", description = "Dish id"),
    ),
    request_body = DishPatch,
    responses(
        (status = 200, description = "Dish updated", body = DishResponse),
        (status = 404, description = "No such dish", body = DishResponse)
    ),
    security(("bearer" = [])),
    summary = "Edit a dish"
)]
#[put("/{id}")]
pub(super) async fn update_dish(
    _admin: AdminPrincipal,
    catalog: web::Data<Catalog>,
    path: web::Path<(i32,)>,
    req_data: web::Json<DishPatch>,
) -> impl Responder {
    let id = path.into_inner().0;
    let patch = req_data.into_inner();
    match catalog.update_dish(id, &patch) {
        Ok(dish) => HttpResponse::Ok().json(DishResponse {
            status: "ok".to_string(),
            data: Some(dish.into()),
            error: None,
        }),
        Err(e) => {
            error!("ADMIN: update_dish({}): {}", id, e);
            dish_error(&e)
        }
    }
}

#[utoipa::path(
    put,
    tag = "Admin",
    path = "/{id}/stock",
    params(
        ("id", description = "Dish id"),
    ),
    responses(
        (status = 200, description = "Stock flag flipped", body = DishResponse),
        (status = 404, description = "No such dish", body = DishResponse)
    ),
    security(("bearer" = [])),
    summary = "Toggle whether a dish is in stock"
)]
#[put("/{id}/stock")]
pub(super) async fn toggle_dish_stock(
    _admin: AdminPrincipal,
    catalog: web::Data<Catalog>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let id = path.into_inner().0;
    match catalog.toggle_stock(id) {
        Ok(dish) => HttpResponse::Ok().json(DishResponse {
            status: "ok".to_string(),
            data: Some(dish.into()),
            error: None,
        }),
        Err(e) => {
            error!("ADMIN: toggle_dish_stock({}): {}", id, e);
            dish_error(&e)
        }
    }
}

#[utoipa::path(
    delete,
    tag = "Admin",
    path = "/{id}",
    params(
        ("id", description = "Dish id"),
    ),
    responses(
        (status = 200, description = "Dish removed", body = GeneralResponse),
        (status = 404, description = "No such dish", body = GeneralResponse)
    ),
    security(("bearer" = [])),
    summary = "Remove a dish from the menu"
)]
#[delete("/{id}")]
pub(super) async fn delete_dish(
    _admin: AdminPrincipal,
    catalog: web::Data<Catalog>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let id = path.into_inner().0;
    match catalog.delete_dish(id) {
        Ok(_) => HttpResponse::Ok().json(GeneralResponse::ok()),
        Err(e) => {
            error!("ADMIN: delete_dish({}): {}", id, e);
            HttpResponse::build(error_status(&e)).json(GeneralResponse::error(public_message(&e)))
        }
    }
}
