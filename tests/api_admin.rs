mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use common::admin_auth_header;
use serde_json::{json, Value};
use srk_house::build_app;
use srk_house::models::orders::OrderStatus;
use srk_house::services::notifications::StatusNotice;
use srk_house::test_utils::{
    date, dish, order, utc, TestHarness, TEST_ADMIN_PASSWORD, TEST_ADMIN_USERNAME,
};

const NOW: &str = "2025-01-02T06:00:00Z";

#[actix_rt::test]
async fn login_issues_token_only_for_right_password() {
    let harness = TestHarness::at(NOW);
    let app = test::init_service(build_app(harness.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/admin/login")
        .set_json(json!({"username": TEST_ADMIN_USERNAME, "password": TEST_ADMIN_PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().expect("token").to_string();

    let req = test::TestRequest::get()
        .uri("/admin/orders")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/admin/login")
        .set_json(json!({"username": TEST_ADMIN_USERNAME, "password": "guess"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["token"].is_null());
}

#[actix_rt::test]
async fn admin_routes_need_a_valid_token() {
    let harness = TestHarness::at(NOW);
    let app = test::init_service(build_app(harness.state.clone())).await;

    let req = test::TestRequest::get().uri("/admin/orders").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/admin/revenue")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::put()
        .uri("/admin/shop")
        .set_json(json!({"is_open": false}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(harness.state.catalog.is_shop_open());
}

#[actix_rt::test]
async fn order_board_lists_newest_first_with_stats() {
    let harness = TestHarness::at(NOW);
    harness.store.seed_order(order("SRK10001", OrderStatus::Pending, 100.0, utc("2025-01-02T01:00:00Z")));
    harness.store.seed_order(order("SRK10002", OrderStatus::Delivered, 200.0, utc("2025-01-02T02:00:00Z")));
    harness.store.seed_order(order("SRK10003", OrderStatus::Pending, 300.0, utc("2025-01-02T03:00:00Z")));
    let app = test::init_service(build_app(harness.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/admin/orders")
        .insert_header(admin_auth_header(&harness))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["data"]["orders"][0]["order_id"], "SRK10003");
    assert_eq!(body["data"]["stats"], json!({"total": 3, "pending": 2, "delivered": 1}));
}

#[actix_rt::test]
async fn status_updates_follow_the_state_machine() {
    let harness = TestHarness::at(NOW);
    harness.store.seed_order(order("SRK10001", OrderStatus::Pending, 100.0, utc("2025-01-02T01:00:00Z")));
    let app = test::init_service(build_app(harness.state.clone())).await;

    let req = test::TestRequest::put()
        .uri("/admin/orders/SRK10001/status")
        .insert_header(admin_auth_header(&harness))
        .set_json(json!({"status": "Cooking"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "Cooking");

    let req = test::TestRequest::put()
        .uri("/admin/orders/SRK10001/status")
        .insert_header(admin_auth_header(&harness))
        .set_json(json!({"status": "Delivered"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::put()
        .uri("/admin/orders/SRK10001/status")
        .insert_header(admin_auth_header(&harness))
        .set_json(json!({"status": "Out for Delivery"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri("/admin/orders/SRK77777/status")
        .insert_header(admin_auth_header(&harness))
        .set_json(json!({"status": "Cooking"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri("/admin/orders/SRK10001/status")
        .insert_header(admin_auth_header(&harness))
        .set_json(json!({"status": "Teleported"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(
        harness.notifier.notices(),
        vec![
            ("SRK10001".to_string(), StatusNotice::Accepted),
            ("SRK10001".to_string(), StatusNotice::Updated),
        ]
    );
}

#[actix_rt::test]
async fn revenue_dashboard_ranges() {
    let harness = TestHarness::at(NOW);
    harness.store.seed_revenue(date("2024-12-31"), 300.0, 3);
    harness.store.seed_revenue(date("2024-10-01"), 900.0, 9);
    harness.store.seed_order(order("SRK10001", OrderStatus::Delivered, 100.0, utc("2025-01-02T01:00:00Z")));
    let app = test::init_service(build_app(harness.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/admin/revenue")
        .insert_header(admin_auth_header(&harness))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    let entries = body["data"]["entries"].as_array().expect("entries");
    // today, the fresh zero snapshot for the 1st, the 31st
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["is_today"], true);
    assert_eq!(entries[0]["revenue"], 100.0);
    assert_eq!(body["data"]["total_revenue"], 400.0);
    assert_eq!(body["data"]["total_orders"], 4);

    let req = test::TestRequest::get()
        .uri("/admin/revenue?range=last_6_months")
        .insert_header(admin_auth_header(&harness))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["entries"].as_array().map(Vec::len), Some(4));

    let req = test::TestRequest::get()
        .uri("/admin/revenue?range=custom&start=2024-09-01&end=2024-10-31")
        .insert_header(admin_auth_header(&harness))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let entries = body["data"]["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["date"], "2024-10-01");

    let req = test::TestRequest::get()
        .uri("/admin/revenue?range=forever")
        .insert_header(admin_auth_header(&harness))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn shop_toggle() {
    let harness = TestHarness::at(NOW);
    let app = test::init_service(build_app(harness.state.clone())).await;

    let req = test::TestRequest::put()
        .uri("/admin/shop")
        .insert_header(admin_auth_header(&harness))
        .set_json(json!({"is_open": false}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["is_open"], false);

    let req = test::TestRequest::get().uri("/shop/status").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["is_open"], false);
}

#[actix_rt::test]
async fn dish_management() {
    let harness = TestHarness::at(NOW);
    harness.store.seed_dish(dish(1, "Paneer Tikka", 180.0, &["Starters"], true));
    let app = test::init_service(build_app(harness.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/admin/dishes")
        .insert_header(admin_auth_header(&harness))
        .set_json(json!({
            "name": "Malai Kofta",
            "description": "Cottage cheese dumplings",
            "price": 200.0,
            "original_price": 250.0,
            "categories": ["Mains", "Veg"],
            "image": {
                "file_name": "kofta.png",
                "content_type": "image/png",
                "data_base64": STANDARD.encode([0x89u8, 0x50, 0x4E, 0x47])
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["in_stock"], true);
    assert_eq!(body["data"]["discount_percentage"], 20);
    let new_id = body["data"]["id"].as_i64().expect("id");
    assert_eq!(harness.images.uploads().len(), 1);

    let req = test::TestRequest::put()
        .uri(&format!("/admin/dishes/{}/stock", new_id))
        .insert_header(admin_auth_header(&harness))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["in_stock"], false);

    let req = test::TestRequest::put()
        .uri("/admin/dishes/1")
        .insert_header(admin_auth_header(&harness))
        .set_json(json!({"price": 160.0}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["price"], 160.0);

    let req = test::TestRequest::delete()
        .uri("/admin/dishes/1")
        .insert_header(admin_auth_header(&harness))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(harness.store.dish_count(), 1);

    let req = test::TestRequest::delete()
        .uri("/admin/dishes/1")
        .insert_header(admin_auth_header(&harness))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn dish_creation_errors_map_to_statuses() {
    let harness = TestHarness::at(NOW);
    let app = test::init_service(build_app(harness.state.clone())).await;
    let form = |image: Value| {
        json!({
            "name": "Malai Kofta",
            "price": 200.0,
            "categories": ["Mains"],
            "image": image
        })
    };

    let req = test::TestRequest::post()
        .uri("/admin/dishes")
        .insert_header(admin_auth_header(&harness))
        .set_json(form(Value::Null))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/admin/dishes")
        .insert_header(admin_auth_header(&harness))
        .set_json(form(json!({
            "file_name": "kofta.png",
            "content_type": "image/png",
            "data_base64": "%%% not base64 %%%"
        })))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    harness.images.set_failing(true);
    let req = test::TestRequest::post()
        .uri("/admin/dishes")
        .insert_header(admin_auth_header(&harness))
        .set_json(form(json!({
            "file_name": "kofta.png",
            "content_type": "image/png",
            "data_base64": STANDARD.encode(b"png")
        })))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(harness.store.dish_count(), 0);
}
