mod common;

use common::{dec_field, unique_user, TestApp};
use rust_decimal_macros::dec;
use serde_json::json;

#[tokio::test]
async fn apply_requires_a_known_code() {
    let app = TestApp::new().await;
    let user = unique_user("coupon");

    let (status, body) = app
        .post("/api/cart/apply-coupon", json!({"user_id": user}))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "Coupon code is required");

    let (status, body) = app
        .post(
            "/api/cart/apply-coupon",
            json!({"user_id": user, "coupon_code": "BOGUS"}),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "Invalid coupon code");
}

#[tokio::test]
async fn apply_enforces_the_minimum_order() {
    let app = TestApp::new().await;
    let user = unique_user("minorder");

    // Empty cart: subtotal 0 is below FLAT10's ₹1,000 minimum.
    let (status, body) = app
        .post(
            "/api/cart/apply-coupon",
            json!({"user_id": user, "coupon_code": "FLAT10"}),
        )
        .await;
    assert_eq!(status, 400);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Minimum order value"));

    // The association must not have been created.
    let (_, body) = app.get(&format!("/api/cart?user_id={user}")).await;
    assert!(body["data"]["applied_coupon"].is_null());
}

#[tokio::test]
async fn apply_returns_fresh_totals() {
    let app = TestApp::new().await;
    let user = unique_user("flat10");

    app.post("/api/cart", json!({"user_id": user, "product_id": 1, "qty": 1}))
        .await;

    let (status, body) = app
        .post(
            "/api/cart/apply-coupon",
            json!({"user_id": user, "coupon_code": "flat10"}),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Coupon applied successfully");
    let data = &body["data"];
    assert_eq!(data["coupon_code"], "FLAT10");
    assert_eq!(dec_field(data, "subtotal"), dec!(29990));
    assert_eq!(dec_field(data, "discount"), dec!(2999));
    assert_eq!(dec_field(data, "total"), dec!(26991));
    assert_eq!(data["applied_coupon"], "FLAT10");
}

#[tokio::test]
async fn coupon_below_threshold_goes_inert_without_being_removed() {
    let app = TestApp::new().await;
    let user = unique_user("inert");
    app.insert_product(400, "Budget Widget", dec!(600)).await;

    let (_, body) = app
        .post("/api/cart", json!({"user_id": user, "product_id": 400, "qty": 2}))
        .await;
    let item_id = body["data"]["id"].as_str().unwrap().to_string();

    // ₹1,200 qualifies for FLAT10.
    let (status, _) = app
        .post(
            "/api/cart/apply-coupon",
            json!({"user_id": user, "coupon_code": "FLAT10"}),
        )
        .await;
    assert_eq!(status, 200);

    // Dropping to ₹600 leaves the coupon applied but voids its effect.
    app.put(&format!("/api/cart/{item_id}"), json!({"user_id": user, "qty": 1}))
        .await;
    let (_, body) = app.get(&format!("/api/cart?user_id={user}")).await;
    let data = &body["data"];
    assert_eq!(data["applied_coupon"], "FLAT10");
    assert_eq!(dec_field(data, "discount"), dec!(0));
    assert_eq!(dec_field(data, "total"), dec!(600));

    // Qualifying again revives the discount without reapplying the code.
    app.put(&format!("/api/cart/{item_id}"), json!({"user_id": user, "qty": 2}))
        .await;
    let (_, body) = app.get(&format!("/api/cart?user_id={user}")).await;
    let data = &body["data"];
    assert_eq!(dec_field(data, "discount"), dec!(120));
    assert_eq!(dec_field(data, "total"), dec!(1080));
}

#[tokio::test]
async fn newer_application_replaces_the_earlier_one() {
    let app = TestApp::new().await;
    let user = unique_user("replace");

    app.post("/api/cart", json!({"user_id": user, "product_id": 4, "qty": 1}))
        .await;

    app.post(
        "/api/cart/apply-coupon",
        json!({"user_id": user, "coupon_code": "FLAT10"}),
    )
    .await;
    let (status, body) = app
        .post(
            "/api/cart/apply-coupon",
            json!({"user_id": user, "coupon_code": "NEWUSER"}),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["coupon_code"], "NEWUSER");
    // 15% of ₹52,990
    assert_eq!(dec_field(&body["data"], "discount"), dec!(7948.50));

    let (_, body) = app.get(&format!("/api/cart?user_id={user}")).await;
    assert_eq!(body["data"]["applied_coupon"], "NEWUSER");
}

#[tokio::test]
async fn fixed_coupon_subtracts_its_value() {
    let app = TestApp::new().await;
    let user = unique_user("save50");

    app.post("/api/cart", json!({"user_id": user, "product_id": 2, "qty": 1}))
        .await;

    let (status, body) = app
        .post(
            "/api/cart/apply-coupon",
            json!({"user_id": user, "coupon_code": "SAVE50"}),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(dec_field(&body["data"], "discount"), dec!(500));
    assert_eq!(dec_field(&body["data"], "total"), dec!(41400));
}

#[tokio::test]
async fn shipping_coupon_applies_with_zero_discount() {
    let app = TestApp::new().await;
    let user = unique_user("freeship");

    app.post("/api/cart", json!({"user_id": user, "product_id": 7, "qty": 1}))
        .await;

    let (status, body) = app
        .post(
            "/api/cart/apply-coupon",
            json!({"user_id": user, "coupon_code": "FREESHIP"}),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["coupon_code"], "FREESHIP");
    assert_eq!(dec_field(&body["data"], "discount"), dec!(0));
    assert_eq!(dec_field(&body["data"], "total"), dec!(599));
}

#[tokio::test]
async fn remove_is_idempotent() {
    let app = TestApp::new().await;
    let user = unique_user("remove");

    app.post("/api/cart", json!({"user_id": user, "product_id": 1, "qty": 1}))
        .await;
    app.post(
        "/api/cart/apply-coupon",
        json!({"user_id": user, "coupon_code": "FLAT10"}),
    )
    .await;

    let (status, body) = app
        .delete(&format!("/api/cart/coupon/remove?user_id={user}"))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Coupon removed");
    assert_eq!(dec_field(&body["data"], "discount"), dec!(0));
    assert!(body["data"]["applied_coupon"].is_null());

    // Removing again reports the same zero-discount state.
    let (status, body) = app
        .delete(&format!("/api/cart/coupon/remove?user_id={user}"))
        .await;
    assert_eq!(status, 200);
    assert_eq!(dec_field(&body["data"], "discount"), dec!(0));
    assert!(body["data"]["applied_coupon"].is_null());

    let (_, body) = app.get(&format!("/api/cart?user_id={user}")).await;
    assert!(body["data"]["applied_coupon"].is_null());
}

#[tokio::test]
async fn coupon_associations_are_per_user() {
    let app = TestApp::new().await;
    let alice = unique_user("alice");
    let bob = unique_user("bob");

    app.post("/api/cart", json!({"user_id": alice, "product_id": 1, "qty": 1}))
        .await;
    app.post("/api/cart", json!({"user_id": bob, "product_id": 1, "qty": 1}))
        .await;
    app.post(
        "/api/cart/apply-coupon",
        json!({"user_id": alice, "coupon_code": "FLAT10"}),
    )
    .await;

    let (_, body) = app.get(&format!("/api/cart?user_id={bob}")).await;
    assert!(body["data"]["applied_coupon"].is_null());
    let (_, body) = app.get(&format!("/api/cart?user_id={alice}")).await;
    assert_eq!(body["data"]["applied_coupon"], "FLAT10");
}
