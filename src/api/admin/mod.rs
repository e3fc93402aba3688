mod dishes;
mod login;
mod orders;
mod revenue;
mod shop;

use crate::AppState;
use actix_web::middleware::NormalizePath;
use actix_web::web;
use dishes::*;
use login::*;
use orders::*;
use revenue::*;
use shop::*;
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub fn config(cfg: &mut ServiceConfig, state: &AppState) {
    cfg.service(
        scope::scope("/admin")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(state.admin_auth.clone()))
            .app_data(web::Data::new(state.catalog.clone()))
            .app_data(web::Data::new(state.lifecycle.clone()))
            .app_data(web::Data::new(state.revenue.clone()))
            .service(admin_login)
            .service(
                scope::scope("/orders")
                    .service(get_all_orders)
                    .service(update_order_status),
            )
            .service(get_revenue)
            .service(set_shop_status)
            .service(
                scope::scope("/dishes")
                    .service(create_dish)
                    .service(update_dish)
                    .service(toggle_dish_stock)
                    .service(delete_dish),
            ),
    );
}
