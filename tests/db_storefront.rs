mod common;

use srk_house::db::{DishOperations, OrderOperations, RevenueOperations, ShopOperations, RepositoryError};
use srk_house::models::catalog::{DishPatch, NewDish, NewDishRow};
use srk_house::models::orders::{Delivery, OrderStatus};
use srk_house::models::revenue::NewDailyRevenue;
use srk_house::test_utils::{date, order, utc};
use srk_house::traits::{DishStore, OrderStore, RevenueStore, ShopSettingsStore};

fn new_dish_row(name: &str, categories: &[&str]) -> NewDishRow {
    let dish = NewDish {
        name: name.to_string(),
        description: None,
        price: 120.0,
        original_price: Some(150.0),
        categories: categories.iter().map(|c| c.to_string()).collect(),
    };
    NewDishRow::new(&dish, "http://localhost:9000/test-bucket/dishes/x.jpg".to_string())
}

#[test]
#[ignore = "needs Postgres"]
fn dishes_round_trip_with_categories() {
    let pool = common::setup_pool();
    let ops = DishOperations::new(pool);

    let tikka = ops.insert_dish(new_dish_row("Paneer Tikka", &["Starters", "Veg"])).expect("insert");
    ops.insert_dish(new_dish_row("Butter Naan", &["Breads"])).expect("insert");
    assert!(tikka.in_stock);
    assert_eq!(tikka.categories, vec!["Starters".to_string(), "Veg".to_string()]);

    let names: Vec<String> = ops.list_dishes().expect("list").into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["Butter Naan", "Paneer Tikka"]);

    let patch = DishPatch {
        in_stock: Some(false),
        ..Default::default()
    };
    assert!(!ops.update_dish(tikka.id, &patch).expect("update").in_stock);
    assert_eq!(ops.update_dish(tikka.id, &DishPatch::default()).expect("noop").id, tikka.id);

    ops.delete_dish(tikka.id).expect("delete");
    assert!(matches!(ops.get_dish(tikka.id), Err(RepositoryError::NotFound(_))));
}

#[test]
#[ignore = "needs Postgres"]
fn orders_keep_items_and_delivery_details() {
    let pool = common::setup_pool();
    let ops = OrderOperations::new(pool);

    ops.insert_order(&order("SRK10001", OrderStatus::Pending, 100.0, utc("2025-01-01T05:00:00Z")))
        .expect("insert");
    ops.insert_order(&order("SRK10002", OrderStatus::Pending, 200.0, utc("2025-01-02T05:00:00Z")))
        .expect("insert");

    let listed = ops.list_orders().expect("list");
    assert_eq!(listed[0].order_id, "SRK10002");

    let found = ops.get_order_by_order_id("SRK10001").expect("found");
    assert_eq!(found.items.len(), 1);
    assert!(matches!(found.delivery, Delivery::University(_)));

    let updated = ops
        .update_order_status("SRK10001", OrderStatus::OutForDelivery)
        .expect("update");
    assert_eq!(updated.status, OrderStatus::OutForDelivery);

    assert!(matches!(
        ops.get_order_by_order_id("SRK99999"),
        Err(RepositoryError::NotFound(_))
    ));
}

#[test]
#[ignore = "needs Postgres"]
fn status_update_touches_only_the_newest_duplicate() {
    let pool = common::setup_pool();
    let ops = OrderOperations::new(pool);

    ops.insert_order(&order("SRK55555", OrderStatus::Delivered, 90.0, utc("2025-01-01T05:00:00Z")))
        .expect("insert");
    ops.insert_order(&order("SRK55555", OrderStatus::Pending, 120.0, utc("2025-01-02T05:00:00Z")))
        .expect("insert");

    let updated = ops
        .update_order_status("SRK55555", OrderStatus::Cooking)
        .expect("update");
    assert_eq!(updated.total, 120.0);
    assert_eq!(updated.status, OrderStatus::Cooking);

    let listed = ops.list_orders().expect("list");
    let statuses: Vec<(f64, OrderStatus)> = listed
        .iter()
        .filter(|o| o.order_id == "SRK55555")
        .map(|o| (o.total, o.status))
        .collect();
    assert_eq!(
        statuses,
        vec![(120.0, OrderStatus::Cooking), (90.0, OrderStatus::Delivered)]
    );
}

#[test]
#[ignore = "needs Postgres"]
fn daily_revenue_rows_are_unique_per_date() {
    let pool = common::setup_pool();
    let ops = RevenueOperations::new(pool);
    let row = NewDailyRevenue {
        date: date("2025-01-01"),
        revenue: 250.0,
        orders_count: 2,
    };

    assert!(ops.insert_daily_revenue(row.clone()).expect("insert").is_some());
    assert!(ops.insert_daily_revenue(row).expect("insert").is_none());
    assert_eq!(ops.list_daily_revenues().expect("list").len(), 1);
}

#[test]
#[ignore = "needs Postgres"]
fn shop_settings_single_row() {
    let pool = common::setup_pool();
    let ops = ShopOperations::new(pool);

    assert!(ops.get_shop_settings().expect("get").is_none());
    let created = ops.insert_shop_settings(true).expect("insert");
    let closed = ops.update_shop_settings(created.id, false).expect("update");
    assert!(!closed.is_open);
    assert!(closed.updated_at >= created.updated_at);
    assert_eq!(ops.get_shop_settings().expect("get").map(|s| s.id), Some(created.id));
}
