// server/tests/api_tests.rs

use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use once_cell::sync::Lazy;
use serde_json::{json, Value};

use storefront::db::connect_in_memory;
use storefront::seed::seed_catalog;
use storefront_server::web::configure_app_routes;
use storefront_server::{AppConfig, AppState};

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

async fn app_state() -> AppState {
  Lazy::force(&TRACING_INIT);
  let pool = connect_in_memory().await.expect("in-memory database");
  seed_catalog(&pool).await.expect("seed catalog");
  let config = AppConfig::from_lookup(|name| match name {
    "DATABASE_URL" => Some("sqlite::memory:".to_string()),
    _ => None,
  })
  .expect("default config");
  AppState::new(pool, config)
}

macro_rules! test_app {
  () => {
    test::init_service(
      App::new()
        .app_data(web::Data::new(app_state().await))
        .configure(configure_app_routes),
    )
    .await
  };
}

async fn into_parts(response: ServiceResponse) -> (StatusCode, Value) {
  let status = response.status();
  let bytes = test::read_body(response).await;
  let body = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).expect("JSON body")
  };
  (status, body)
}

macro_rules! send {
  ($app:expr, $req:expr $(,)?) => {
    into_parts(test::call_service($app, $req.to_request()).await).await
  };
}

#[actix_web::test]
async fn health_check_reports_ok() {
  let app = test_app!();
  let (status, body) = send!(&app, test::TestRequest::get().uri("/api/health"));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "status": "ok" }));
}

#[actix_web::test]
async fn catalog_routes_return_raw_json() {
  let app = test_app!();

  let (status, body) = send!(&app, test::TestRequest::get().uri("/api/categories"));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 4);
  assert_eq!(body[0]["imageUrl"].as_str().map(|s| s.starts_with("https://")), Some(true));

  let (status, body) = send!(&app, test::TestRequest::get().uri("/api/categories/kitchen"));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["name"], "Kitchen");

  let (status, body) = send!(&app, test::TestRequest::get().uri("/api/products/blue-linen-shirt"));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["discountPrice"], 29.99);
  assert_eq!(body["inStock"], true);
  assert_eq!(body["stockLevel"], "In Stock");

  let (status, body) = send!(&app, test::TestRequest::get().uri("/api/products/featured"));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 8);

  let (status, body) = send!(&app, test::TestRequest::get().uri("/api/products/new"));
  assert_eq!(status, StatusCode::OK);
  assert!(body.as_array().unwrap().iter().all(|p| p["isNew"] == true));

  let (status, body) = send!(&app, test::TestRequest::get().uri("/api/products/clearance"));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 16);

  let (status, body) = send!(&app, test::TestRequest::get().uri("/api/products/search?q=linen"));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body[0]["slug"], "blue-linen-shirt");

  let (status, body) = send!(&app, test::TestRequest::get().uri("/api/products/category/1"));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 8);
}

#[actix_web::test]
async fn catalog_lookups_fail_cleanly() {
  let app = test_app!();

  let (status, body) = send!(&app, test::TestRequest::get().uri("/api/products/category/abc"));
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string());

  let (status, _) = send!(&app, test::TestRequest::get().uri("/api/products/unknown-thing"));
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _) = send!(&app, test::TestRequest::get().uri("/api/categories/garden"));
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, body) = send!(&app, test::TestRequest::get().uri("/api/products/search?q=%20"));
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["details"][0]["field"], "q");

  let (status, _) = send!(&app, test::TestRequest::get().uri("/api/products/search"));
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn cart_lifecycle() {
  let app = test_app!();

  let add = |product_id: i64, quantity: i32| {
    test::TestRequest::post()
      .uri("/api/cart")
      .set_json(json!({ "cartId": "cart-web", "productId": product_id, "quantity": quantity }))
  };

  let (status, first) = send!(&app, add(5, 2));
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(first["quantity"], 2);
  let (_, merged) = send!(&app, add(5, 3));
  assert_eq!(merged["id"], first["id"]);
  assert_eq!(merged["quantity"], 5);

  let (status, body) = send!(&app, test::TestRequest::get().uri("/api/cart/cart-web"));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 1);
  assert_eq!(body[0]["product"]["slug"], "cotton-t-shirt");

  let item_id = first["id"].as_i64().unwrap();
  let (status, body) = send!(
    &app,
    test::TestRequest::put()
      .uri(&format!("/api/cart/{}", item_id))
      .set_json(json!({ "quantity": 1 })),
  );
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["quantity"], 1);

  let (status, body) = send!(&app, test::TestRequest::get().uri("/api/cart/cart-web/summary"));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["cartTotal"], 24.99);
  assert_eq!(body["taxRate"], 0.08);
  assert_eq!(body["finalTotal"], 26.99);

  let (status, _) = send!(
    &app,
    test::TestRequest::delete().uri(&format!("/api/cart/{}", item_id)),
  );
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (status, _) = send!(
    &app,
    test::TestRequest::delete().uri(&format!("/api/cart/{}", item_id)),
  );
  assert_eq!(status, StatusCode::NO_CONTENT);

  send!(&app, add(1, 1));
  let (status, _) = send!(&app, test::TestRequest::delete().uri("/api/cart/clear/cart-web"));
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (_, body) = send!(&app, test::TestRequest::get().uri("/api/cart/cart-web"));
  assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn cart_rejects_bad_requests() {
  let app = test_app!();

  let (status, body) = send!(
    &app,
    test::TestRequest::post()
      .uri("/api/cart")
      .set_json(json!({ "cartId": "c", "productId": 1, "quantity": 0 })),
  );
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["details"][0]["field"], "quantity");

  let (status, _) = send!(
    &app,
    test::TestRequest::post()
      .uri("/api/cart")
      .set_json(json!({ "cartId": "c", "productId": 999, "quantity": 1 })),
  );
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, _) = send!(
    &app,
    test::TestRequest::post()
      .uri("/api/cart")
      .set_json(json!({ "cartId": "c", "productId": "one" })),
  );
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, _) = send!(
    &app,
    test::TestRequest::put()
      .uri("/api/cart/4040")
      .set_json(json!({ "quantity": 2 })),
  );
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _) = send!(&app, test::TestRequest::delete().uri("/api/cart/not-a-number"));
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn orders_can_be_created_fetched_and_advanced() {
  let app = test_app!();

  let (status, order) = send!(
    &app,
    test::TestRequest::post().uri("/api/orders").set_json(json!({
      "order": {
        "customerName": "Ada Lovelace",
        "customerEmail": "a@b.com",
        "customerPhone": "555-0100",
        "totalAmount": 59.98
      },
      "items": [{ "productId": 1, "quantity": 2, "price": 29.99 }]
    })),
  );
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(order["status"], "pending");
  let order_id = order["id"].as_i64().unwrap();

  let (status, fetched) = send!(&app, test::TestRequest::get().uri(&format!("/api/orders/{}", order_id)));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched["totalAmount"], 59.98);
  assert_eq!(fetched["items"][0]["price"], 29.99);
  assert_eq!(fetched["items"][0]["product"]["slug"], "blue-linen-shirt");

  let patch_status = |status: &str| {
    test::TestRequest::patch()
      .uri(&format!("/api/orders/{}/status", order_id))
      .set_json(json!({ "status": status }))
  };

  let (status, _) = send!(&app, patch_status("shipped"));
  assert_eq!(status, StatusCode::BAD_REQUEST);
  let (status, body) = send!(&app, patch_status("processing"));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "processing");
  let (status, _) = send!(&app, patch_status("returned"));
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, body) = send!(&app, test::TestRequest::get().uri("/api/orders"));
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn order_errors_map_to_status_codes() {
  let app = test_app!();

  let (status, body) = send!(
    &app,
    test::TestRequest::post().uri("/api/orders").set_json(json!({
      "order": {
        "customerName": "Ada",
        "customerEmail": "a@b.com",
        "customerPhone": "1",
        "totalAmount": 0
      },
      "items": []
    })),
  );
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Order must contain at least one item");

  let (status, body) = send!(
    &app,
    test::TestRequest::post().uri("/api/orders").set_json(json!({
      "order": {
        "customerName": "Ada",
        "customerEmail": "a@b.com",
        "customerPhone": "1",
        "totalAmount": 49.99,
        "status": "delivered"
      },
      "items": [{ "productId": 1, "quantity": 1, "price": 49.99 }]
    })),
  );
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["details"][0]["field"], "status");
  let (_, listed) = send!(&app, test::TestRequest::get().uri("/api/orders"));
  assert_eq!(listed, json!([]));

  let (status, _) = send!(
    &app,
    test::TestRequest::patch()
      .uri("/api/orders/999/status")
      .set_json(json!({ "status": "delivered" })),
  );
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _) = send!(&app, test::TestRequest::get().uri("/api/orders/999"));
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _) = send!(&app, test::TestRequest::get().uri("/api/orders/first"));
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn checkout_turns_cart_into_order() {
  let app = test_app!();

  send!(
    &app,
    test::TestRequest::post()
      .uri("/api/cart")
      .set_json(json!({ "cartId": "cart-co", "productId": 1, "quantity": 2 })),
  );

  let (status, placed) = send!(
    &app,
    test::TestRequest::post().uri("/api/cart/cart-co/checkout").set_json(json!({
      "customerName": "Ada Lovelace",
      "customerEmail": "a@b.com",
      "customerPhone": "555-0100"
    })),
  );
  assert_eq!(status, StatusCode::CREATED);
  // 2 x 29.99 = 59.98, plus 8% tax (4.80)
  assert_eq!(placed["totalAmount"], 64.78);
  assert_eq!(placed["items"][0]["price"], 29.99);

  let (_, cart) = send!(&app, test::TestRequest::get().uri("/api/cart/cart-co"));
  assert_eq!(cart, json!([]));

  let (status, body) = send!(
    &app,
    test::TestRequest::post().uri("/api/cart/cart-co/checkout").set_json(json!({
      "customerName": "Ada Lovelace",
      "customerEmail": "a@b.com",
      "customerPhone": "555-0100"
    })),
  );
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Order must contain at least one item");
}
