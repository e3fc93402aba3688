mod menu;
mod orders;
mod shop;

use crate::AppState;
use actix_web::middleware::NormalizePath;
use actix_web::web;
use menu::*;
use orders::*;
use shop::*;
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub fn config(cfg: &mut ServiceConfig, state: &AppState) {
    cfg.service(
        scope::scope("/shop")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(state.catalog.clone()))
            .service(get_shop_status),
    )
    .service(
        scope::scope("/menu")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(state.catalog.clone()))
            .service(list_menu)
            .service(list_featured)
            .service(get_dish),
    )
    .service(
        scope::scope("/orders")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(state.lifecycle.clone()))
            .service(checkout)
            .service(track_order),
    );
}
