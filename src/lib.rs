#[macro_use]
extern crate log;

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod enums;
pub mod models;
pub mod services;
pub mod test_utils;
pub mod traits;

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa_actix_web::AppExt;

use crate::auth::AdminAuthConfig;
use crate::config::{S3Config, ShopConfig};
use crate::db::{
    establish_connection_pool, run_db_migrations, AssetOperations, DishOperations,
    OrderOperations, RevenueOperations, ShopOperations,
};
use crate::services::catalog::Catalog;
use crate::services::notifications::LogNotifier;
use crate::services::order_lifecycle::OrderLifecycle;
use crate::services::revenue::RevenueAggregator;
use crate::services::shop_clock::ShopClock;
use crate::traits::{DishStore, ImageStore, Notifier, OrderStore, RevenueStore, ShopSettingsStore};

/// The storage seams the services are built on.
#[derive(Clone)]
pub struct Backends {
    pub dishes: Arc<dyn DishStore>,
    pub orders: Arc<dyn OrderStore>,
    pub shop: Arc<dyn ShopSettingsStore>,
    pub revenues: Arc<dyn RevenueStore>,
    pub images: Arc<dyn ImageStore>,
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub lifecycle: OrderLifecycle,
    pub revenue: RevenueAggregator,
    pub admin_auth: AdminAuthConfig,
}

impl AppState {
    pub async fn new(url: &str) -> Self {
        let db = establish_connection_pool(url);
        run_db_migrations(db.clone()).expect("Unable to run migrations");

        let asset_ops = AssetOperations::new(&S3Config::from_env())
            .await
            .expect("Unable to create asset_ops");

        let backends = Backends {
            dishes: Arc::new(DishOperations::new(db.clone())),
            orders: Arc::new(OrderOperations::new(db.clone())),
            shop: Arc::new(ShopOperations::new(db.clone())),
            revenues: Arc::new(RevenueOperations::new(db)),
            images: Arc::new(asset_ops),
        };
        let shop_cfg = ShopConfig::from_env();
        info!(
            "Shop time zone {}, transition policy {}",
            shop_cfg.tz, shop_cfg.transition_policy
        );

        AppState::assemble(
            backends,
            Arc::new(LogNotifier),
            ShopClock::new(shop_cfg.tz),
            &shop_cfg,
            AdminAuthConfig::from_env(),
        )
    }

    pub fn assemble(
        backends: Backends,
        notifier: Arc<dyn Notifier>,
        clock: ShopClock,
        shop_cfg: &ShopConfig,
        admin_auth: AdminAuthConfig,
    ) -> Self {
        AppState {
            catalog: Catalog::new(backends.dishes, backends.shop.clone(), backends.images),
            lifecycle: OrderLifecycle::new(
                backends.orders.clone(),
                backends.shop,
                notifier,
                clock,
                shop_cfg,
            ),
            revenue: RevenueAggregator::new(backends.orders, backends.revenues, clock),
            admin_auth,
        }
    }
}

/// Full application with the OpenAPI document at `/api-docs/openapi.json`.
pub fn build_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::JsonConfig::default().error_handler(api::default_error_handler))
        .app_data(web::QueryConfig::default().error_handler(api::query_error_handler))
        .into_utoipa_app()
        .configure(|cfg| api::configure(cfg, &state))
        .openapi_service(|mut openapi| {
            openapi
                .components
                .get_or_insert_with(Default::default)
                .add_security_scheme(
                    "bearer",
                    SecurityScheme::Http(
                        HttpBuilder::new()
                            .scheme(HttpAuthScheme::Bearer)
                            .bearer_format("JWT")
                            .build(),
                    ),
                );
            web::resource("/api-docs/openapi.json").route(web::get().to(move || {
                let openapi = openapi.clone();
                async move { HttpResponse::Ok().json(openapi) }
            }))
        })
        .into_app()
}
