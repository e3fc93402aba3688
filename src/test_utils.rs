use crate::auth::password::hash_password;
use crate::auth::{AdminAuthConfig, AdminJwtConfig};
use crate::config::ShopConfig;
use crate::db::{establish_connection_pool, run_db_migrations, DbConnection, RepositoryError, S3Error};
use crate::models::catalog::{Dish, DishPatch, NewDishRow};
use crate::models::orders::{
    CustomerInfo, Delivery, DeliveryType, Order, OrderLine, OrderStatus, UniversityDelivery,
};
use crate::models::revenue::{DailyRevenue, NewDailyRevenue};
use crate::models::shop::ShopSettings;
use crate::services::notifications::StatusNotice;
use crate::services::shop_clock::ShopClock;
use crate::traits::{
    DishStore, ImageStore, Notifier, OrderStore, RevenueStore, ShopSettingsStore,
};
use crate::{AppState, Backends};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

// Fixture strategy:
// - Services run over the in-memory stores below; no database needed.
// - Postgres helpers at the bottom back the ignored db_* tests.
const TEST_S3_ENDPOINT: &str = "http://localhost:9000";
const TEST_S3_REGION: &str = "us-east-1";
const TEST_S3_ACCESS_KEY: &str = "test-access-key";
const TEST_S3_SECRET_KEY: &str = "test-secret-key";
const TEST_S3_BUCKET: &str = "test-bucket";
const TEST_ADMIN_JWT_SECRET: &str = "test-admin-secret";
pub const TEST_ADMIN_USERNAME: &str = "admin";
pub const TEST_ADMIN_PASSWORD: &str = "test-password";

#[derive(Default)]
struct MemoryTables {
    dishes: Vec<Dish>,
    next_dish_id: i32,
    orders: Vec<Order>,
    shop: Option<ShopSettings>,
    shop_inserts: usize,
    revenues: Vec<DailyRevenue>,
}

/// Every store trait over one mutex-guarded set of tables.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<MemoryTables>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every call fails like an unreachable database.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn seed_dish(&self, dish: Dish) {
        let mut tables = self.tables.lock().expect("memory store lock");
        tables.next_dish_id = tables.next_dish_id.max(dish.id);
        tables.dishes.push(dish);
    }

    pub fn seed_order(&self, order: Order) {
        self.tables
            .lock()
            .expect("memory store lock")
            .orders
            .push(order);
    }

    pub fn seed_revenue(&self, date: NaiveDate, revenue: f64, orders_count: i32) {
        let mut tables = self.tables.lock().expect("memory store lock");
        let id = tables.revenues.len() as i32 + 1;
        tables.revenues.push(DailyRevenue {
            id,
            date,
            revenue,
            orders_count,
            created_at: Utc::now(),
        });
    }

    pub fn dish_count(&self) -> usize {
        self.tables.lock().expect("memory store lock").dishes.len()
    }

    pub fn stored_orders(&self) -> Vec<Order> {
        self.tables.lock().expect("memory store lock").orders.clone()
    }

    pub fn stored_revenues(&self) -> Vec<DailyRevenue> {
        self.tables.lock().expect("memory store lock").revenues.clone()
    }

    /// How many times a settings row was created.
    pub fn shop_inserts(&self) -> usize {
        self.tables.lock().expect("memory store lock").shop_inserts
    }

    fn tables(&self) -> Result<std::sync::MutexGuard<'_, MemoryTables>, RepositoryError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RepositoryError::Corrupt("memory store offline".to_string()));
        }
        self.tables
            .lock()
            .map_err(|e| RepositoryError::Corrupt(format!("memory store poisoned: {e}")))
    }
}

impl DishStore for MemoryStore {
    fn list_dishes(&self) -> Result<Vec<Dish>, RepositoryError> {
        let mut dishes = self.tables()?.dishes.clone();
        dishes.sort_by(|a, b| {
            a.categories
                .first()
                .cmp(&b.categories.first())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(dishes)
    }

    fn get_dish(&self, id: i32) -> Result<Dish, RepositoryError> {
        self.tables()?
            .dishes
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("dishes: {id}")))
    }

    fn insert_dish(&self, row: NewDishRow) -> Result<Dish, RepositoryError> {
        let mut tables = self.tables()?;
        tables.next_dish_id += 1;
        let dish = Dish {
            id: tables.next_dish_id,
            name: row.name,
            description: row.description,
            price: row.price,
            original_price: row.original_price,
            categories: row.categories,
            image_url: row.image_url,
            in_stock: row.in_stock,
            created_at: Utc::now(),
        };
        tables.dishes.push(dish.clone());
        Ok(dish)
    }

    fn update_dish(&self, id: i32, patch: &DishPatch) -> Result<Dish, RepositoryError> {
        let mut tables = self.tables()?;
        let dish = tables
            .dishes
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("dishes: {id}")))?;
        dish.apply(patch);
        Ok(dish.clone())
    }

    fn delete_dish(&self, id: i32) -> Result<Dish, RepositoryError> {
        let mut tables = self.tables()?;
        let idx = tables
            .dishes
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("dishes: {id}")))?;
        Ok(tables.dishes.remove(idx))
    }
}

impl OrderStore for MemoryStore {
    fn insert_order(&self, order: &Order) -> Result<(), RepositoryError> {
        self.tables()?.orders.push(order.clone());
        Ok(())
    }

    fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = self.tables()?.orders.clone();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut tables = self.tables()?;
        let order = tables
            .orders
            .iter_mut()
            .filter(|o| o.order_id == order_id)
            .max_by_key(|o| o.created_at)
            .ok_or_else(|| RepositoryError::NotFound(format!("orders: {order_id}")))?;
        order.status = status;
        Ok(order.clone())
    }

    fn get_order_by_order_id(&self, order_id: &str) -> Result<Order, RepositoryError> {
        self.tables()?
            .orders
            .iter()
            .filter(|o| o.order_id == order_id)
            .max_by_key(|o| o.created_at)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("orders: {order_id}")))
    }
}

impl ShopSettingsStore for MemoryStore {
    fn get_shop_settings(&self) -> Result<Option<ShopSettings>, RepositoryError> {
        Ok(self.tables()?.shop.clone())
    }

    fn insert_shop_settings(&self, is_open: bool) -> Result<ShopSettings, RepositoryError> {
        let mut tables = self.tables()?;
        tables.shop_inserts += 1;
        let settings = ShopSettings {
            id: tables.shop_inserts as i32,
            is_open,
            updated_at: Utc::now(),
        };
        tables.shop = Some(settings.clone());
        Ok(settings)
    }

    fn update_shop_settings(&self, id: i32, is_open: bool) -> Result<ShopSettings, RepositoryError> {
        let mut tables = self.tables()?;
        match tables.shop.as_mut() {
            Some(settings) if settings.id == id => {
                settings.is_open = is_open;
                settings.updated_at = Utc::now();
                Ok(settings.clone())
            }
            _ => Err(RepositoryError::NotFound(format!("shop_settings: {id}"))),
        }
    }
}

impl RevenueStore for MemoryStore {
    fn list_daily_revenues(&self) -> Result<Vec<DailyRevenue>, RepositoryError> {
        let mut rows = self.tables()?.revenues.clone();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    fn insert_daily_revenue(
        &self,
        row: NewDailyRevenue,
    ) -> Result<Option<DailyRevenue>, RepositoryError> {
        let mut tables = self.tables()?;
        if tables.revenues.iter().any(|r| r.date == row.date) {
            return Ok(None);
        }
        let stored = DailyRevenue {
            id: tables.revenues.len() as i32 + 1,
            date: row.date,
            revenue: row.revenue,
            orders_count: row.orders_count,
            created_at: Utc::now(),
        };
        tables.revenues.push(stored.clone());
        Ok(Some(stored))
    }
}

/// Image store keeping uploads in memory; can be switched to fail.
#[derive(Default)]
pub struct MemoryImageStore {
    uploads: Mutex<Vec<(String, String, usize)>>,
    failing: AtomicBool,
}

impl MemoryImageStore {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// `(key, content_type, size)` of every successful upload.
    pub fn uploads(&self) -> Vec<(String, String, usize)> {
        self.uploads.lock().expect("image store lock").clone()
    }
}

impl ImageStore for MemoryImageStore {
    fn upload_image<'a>(
        &'a self,
        key: &'a str,
        content_type: &'a str,
        bytes: Vec<u8>,
    ) -> BoxFuture<'a, Result<String, S3Error>> {
        Box::pin(async move {
            if self.failing.load(Ordering::SeqCst) {
                return Err(S3Error::S3OperationFailed("bucket unreachable".to_string()));
            }
            self.uploads
                .lock()
                .map_err(|e| S3Error::S3OperationFailed(e.to_string()))?
                .push((key.to_string(), content_type.to_string(), bytes.len()));
            Ok(format!("{}/{}/{}", TEST_S3_ENDPOINT, TEST_S3_BUCKET, key))
        })
    }
}

/// Remembers every notice it is given.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(String, StatusNotice)>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<(String, StatusNotice)> {
        self.notices.lock().expect("notifier lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, order: &Order, notice: StatusNotice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push((order.order_id.clone(), notice));
        }
    }
}

/// India Standard Time, the shop's home offset.
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("IST offset")
}

pub fn utc(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

pub fn date(ymd: &str) -> NaiveDate {
    NaiveDate::parse_from_str(ymd, "%Y-%m-%d").expect("valid date")
}

pub fn dish(id: i32, name: &str, price: f64, categories: &[&str], in_stock: bool) -> Dish {
    Dish {
        id,
        name: name.to_string(),
        description: None,
        price,
        original_price: None,
        categories: categories.iter().map(|c| c.to_string()).collect(),
        image_url: Some(format!("{}/{}/dishes/{}.jpg", TEST_S3_ENDPOINT, TEST_S3_BUCKET, id)),
        in_stock,
        created_at: utc("2025-01-01T00:00:00Z"),
    }
}

pub fn university_customer() -> CustomerInfo {
    CustomerInfo {
        delivery_type: Some(DeliveryType::University),
        phone: Some("9876543210".to_string()),
        gate: Some("Gate 3".to_string()),
        student_name: Some("Asha".to_string()),
        ..Default::default()
    }
}

pub fn address_customer() -> CustomerInfo {
    CustomerInfo {
        delivery_type: Some(DeliveryType::Address),
        phone: Some("9876543210".to_string()),
        name: Some("Ravi".to_string()),
        address1: Some("12 Mall Road".to_string()),
        city: Some("Mohali".to_string()),
        state: Some("Punjab".to_string()),
        pincode: Some("140301".to_string()),
        ..Default::default()
    }
}

pub fn order(order_id: &str, status: OrderStatus, total: f64, created_at: DateTime<Utc>) -> Order {
    Order {
        order_id: order_id.to_string(),
        items: vec![OrderLine {
            name: "Paneer Tikka".to_string(),
            price: total,
            quantity: 1,
        }],
        customer_name: "Asha".to_string(),
        customer_phone: "9876543210".to_string(),
        delivery: Delivery::University(UniversityDelivery {
            gate: "Gate 3".to_string(),
            student_name: "Asha".to_string(),
            location: crate::config::DEFAULT_CAMPUS_LABEL.to_string(),
        }),
        total,
        status,
        created_at,
    }
}

pub fn test_admin_auth() -> AdminAuthConfig {
    AdminAuthConfig {
        username: TEST_ADMIN_USERNAME.to_string(),
        password_hash: hash_password(TEST_ADMIN_PASSWORD).expect("hash test password"),
        jwt: AdminJwtConfig {
            secret: TEST_ADMIN_JWT_SECRET.to_string(),
            issuer: "srk-house-test".to_string(),
            audience: "admin".to_string(),
            expiry_secs: 600,
        },
    }
}

/// Application state over in-memory stores, with handles for inspection.
pub struct TestHarness {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub images: Arc<MemoryImageStore>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestHarness {
    pub fn new(clock: ShopClock, shop_cfg: ShopConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let images = Arc::new(MemoryImageStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let backends = Backends {
            dishes: store.clone(),
            orders: store.clone(),
            shop: store.clone(),
            revenues: store.clone(),
            images: images.clone(),
        };
        let state = AppState::assemble(
            backends,
            notifier.clone(),
            clock,
            &shop_cfg,
            test_admin_auth(),
        );
        TestHarness {
            state,
            store,
            images,
            notifier,
        }
    }

    /// Shop in IST with the clock frozen at `now`.
    pub fn at(now: &str) -> Self {
        let shop_cfg = ShopConfig {
            tz: ist(),
            ..ShopConfig::default()
        };
        TestHarness::new(ShopClock::fixed(utc(now), ist()), shop_cfg)
    }
}

fn set_env_if_unset(key: &str, value: &str) {
    if std::env::var_os(key).is_none() {
        std::env::set_var(key, value);
    }
}

pub fn init_test_env() {
    set_env_if_unset("S3_ENDPOINT", TEST_S3_ENDPOINT);
    set_env_if_unset("S3_REGION", TEST_S3_REGION);
    set_env_if_unset("S3_ACCESS_KEY_ID", TEST_S3_ACCESS_KEY);
    set_env_if_unset("S3_SECRET_KEY", TEST_S3_SECRET_KEY);
    set_env_if_unset("S3_BUCKET_NAME", TEST_S3_BUCKET);
    set_env_if_unset("AWS_EC2_METADATA_DISABLED", "true");
    set_env_if_unset("ADMIN_JWT_SECRET", TEST_ADMIN_JWT_SECRET);
}

pub fn build_test_pool(database_url: &str) -> Pool<ConnectionManager<PgConnection>> {
    let pool = establish_connection_pool(database_url);
    run_db_migrations(pool.clone()).expect("Unable to run migrations");
    pool
}

pub fn reset_db(pool: &Pool<ConnectionManager<PgConnection>>) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(pool)?;
    diesel::sql_query(
        "TRUNCATE TABLE dishes, orders, daily_revenues, shop_settings RESTART IDENTITY CASCADE",
    )
    .execute(conn.connection())
    .map_err(RepositoryError::DatabaseError)?;
    Ok(())
}
