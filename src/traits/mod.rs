use futures::future::BoxFuture;

use crate::db::{RepositoryError, S3Error};
use crate::models::catalog::{Dish, DishPatch, NewDishRow};
use crate::models::orders::{Order, OrderStatus};
use crate::models::revenue::{DailyRevenue, NewDailyRevenue};
use crate::models::shop::ShopSettings;
use crate::services::notifications::StatusNotice;

pub trait DishStore: Send + Sync {
    /// All dishes ordered by first category, then name.
    fn list_dishes(&self) -> Result<Vec<Dish>, RepositoryError>;
    fn get_dish(&self, id: i32) -> Result<Dish, RepositoryError>;
    fn insert_dish(&self, dish: NewDishRow) -> Result<Dish, RepositoryError>;
    fn update_dish(&self, id: i32, patch: &DishPatch) -> Result<Dish, RepositoryError>;
    fn delete_dish(&self, id: i32) -> Result<Dish, RepositoryError>;
}

pub trait OrderStore: Send + Sync {
    fn insert_order(&self, order: &Order) -> Result<(), RepositoryError>;
    /// Newest first.
    fn list_orders(&self) -> Result<Vec<Order>, RepositoryError>;
    fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError>;
    fn get_order_by_order_id(&self, order_id: &str) -> Result<Order, RepositoryError>;
}

/// The shop settings table holds a single row.
pub trait ShopSettingsStore: Send + Sync {
    fn get_shop_settings(&self) -> Result<Option<ShopSettings>, RepositoryError>;
    fn insert_shop_settings(&self, is_open: bool) -> Result<ShopSettings, RepositoryError>;
    fn update_shop_settings(&self, id: i32, is_open: bool)
        -> Result<ShopSettings, RepositoryError>;
}

pub trait RevenueStore: Send + Sync {
    fn list_daily_revenues(&self) -> Result<Vec<DailyRevenue>, RepositoryError>;
    /// Returns `None` when a row for that date already exists.
    fn insert_daily_revenue(
        &self,
        row: NewDailyRevenue,
    ) -> Result<Option<DailyRevenue>, RepositoryError>;
}

pub trait ImageStore: Send + Sync {
    /// Stores the image and returns the URL it is publicly served from.
    fn upload_image<'a>(
        &'a self,
        key: &'a str,
        content_type: &'a str,
        bytes: Vec<u8>,
    ) -> BoxFuture<'a, Result<String, S3Error>>;
}

/// Receives a notice after every successful order status change.
pub trait Notifier: Send + Sync {
    fn notify(&self, order: &Order, notice: StatusNotice);
}

/// Client-side key-value storage the cart is persisted in.
pub trait CartStorage {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

pub trait ImageKey {
    fn image_key(&self) -> String;
}

impl ImageKey for crate::models::catalog::ImageUpload {
    fn image_key(&self) -> String {
        let ext = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or_else(|| "bin".to_string());
        format!("dishes/{}.{}", uuid::Uuid::new_v4(), ext)
    }
}
