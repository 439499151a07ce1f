mod common;

use common::{dec_field, unique_user, TestApp};
use rust_decimal_macros::dec;
use serde_json::json;

#[tokio::test]
async fn empty_cart_has_zero_totals() {
    let app = TestApp::new().await;
    let user = unique_user("cart");
    let (status, body) = app.get(&format!("/api/cart?user_id={user}")).await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["cart"].as_array().unwrap().len(), 0);
    assert_eq!(dec_field(data, "subtotal"), dec!(0));
    assert_eq!(dec_field(data, "discount"), dec!(0));
    assert_eq!(dec_field(data, "total"), dec!(0));
    assert_eq!(data["item_count"], 0);
}

#[tokio::test]
async fn repeat_adds_merge_into_one_line() {
    let app = TestApp::new().await;
    let user = unique_user("merge");

    let (status, body) = app
        .post("/api/cart", json!({"user_id": user, "product_id": 1, "qty": 2}))
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "Item added to cart");
    assert_eq!(body["data"]["qty"], 2);

    let (status, body) = app
        .post("/api/cart", json!({"user_id": user, "product_id": 1, "qty": 3}))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Cart updated");
    assert_eq!(body["data"]["qty"], 5);

    let (_, body) = app.get(&format!("/api/cart?user_id={user}")).await;
    let data = &body["data"];
    let cart = data["cart"].as_array().unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0]["qty"], 5);
    assert_eq!(cart[0]["product_name"], "Sony WH-1000XM5 Wireless Headphones");
    assert_eq!(dec_field(&cart[0], "price"), dec!(29990));
    assert_eq!(dec_field(data, "subtotal"), dec!(149950));
    assert_eq!(data["item_count"], 5);
}

#[tokio::test]
async fn price_is_captured_at_add_time() {
    let app = TestApp::new().await;
    let user = unique_user("snapshot");
    app.insert_product(200, "Flash Sale Widget", dec!(750)).await;

    app.post("/api/cart", json!({"user_id": user, "product_id": 200, "qty": 1}))
        .await;

    // Catalog price changes after the add; the cart keeps the captured one.
    use sea_orm::{ActiveModelTrait, ActiveValue};
    let update = ecommart_api::entities::product::ActiveModel {
        id: ActiveValue::Unchanged(200),
        price: ActiveValue::Set(dec!(999)),
        ..Default::default()
    };
    update.update(&*app.state.db).await.unwrap();

    let (_, body) = app.get(&format!("/api/cart?user_id={user}")).await;
    assert_eq!(dec_field(&body["data"]["cart"][0], "price"), dec!(750));
    assert_eq!(dec_field(&body["data"], "subtotal"), dec!(750));
}

#[tokio::test]
async fn add_requires_existing_product_and_positive_qty() {
    let app = TestApp::new().await;
    let user = unique_user("invalid");

    let (status, body) = app
        .post("/api/cart", json!({"user_id": user, "product_id": 999, "qty": 1}))
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Product not found");

    let (status, body) = app
        .post("/api/cart", json!({"user_id": user, "product_id": 1, "qty": 0}))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "Quantity must be greater than 0");

    let (status, body) = app.post("/api/cart", json!({"user_id": user})).await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "product_id and qty are required");

    let (_, body) = app.get(&format!("/api/cart?user_id={user}")).await;
    assert_eq!(body["data"]["cart"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn update_replaces_quantity_in_place() {
    let app = TestApp::new().await;
    let user = unique_user("update");

    let (_, body) = app
        .post("/api/cart", json!({"user_id": user, "product_id": 3, "qty": 2}))
        .await;
    let item_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .put(&format!("/api/cart/{item_id}"), json!({"user_id": user, "qty": 7}))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["qty"], 7);

    let (status, body) = app
        .put(&format!("/api/cart/{item_id}"), json!({"user_id": user, "qty": 0}))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "Quantity must be at least 1");

    let (_, body) = app.get(&format!("/api/cart?user_id={user}")).await;
    assert_eq!(body["data"]["cart"][0]["qty"], 7);
}

#[tokio::test]
async fn update_of_unknown_line_is_404() {
    let app = TestApp::new().await;
    let user = unique_user("missing");

    let (status, body) = app
        .put(
            "/api/cart/00000000-0000-0000-0000-000000000000",
            json!({"user_id": user, "qty": 2}),
        )
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Cart item not found");
}

#[tokio::test]
async fn remove_deletes_only_the_targeted_line() {
    let app = TestApp::new().await;
    let user = unique_user("remove");

    let (_, first) = app
        .post("/api/cart", json!({"user_id": user, "product_id": 1, "qty": 1}))
        .await;
    app.post("/api/cart", json!({"user_id": user, "product_id": 2, "qty": 1}))
        .await;
    let first_id = first["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .delete(&format!("/api/cart/{first_id}?user_id={user}"))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Item removed from cart");
    assert_eq!(body["data"]["product_id"], 1);

    let (_, body) = app.get(&format!("/api/cart?user_id={user}")).await;
    let cart = body["data"]["cart"].as_array().unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0]["product_id"], 2);
}

#[tokio::test]
async fn removing_a_nonexistent_line_leaves_the_cart_unchanged() {
    let app = TestApp::new().await;
    let user = unique_user("keep");

    app.post("/api/cart", json!({"user_id": user, "product_id": 5, "qty": 2}))
        .await;

    let (status, body) = app
        .delete(&format!(
            "/api/cart/00000000-0000-0000-0000-000000000000?user_id={user}"
        ))
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Cart item not found");

    let (_, body) = app.get(&format!("/api/cart?user_id={user}")).await;
    assert_eq!(body["data"]["cart"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["item_count"], 2);
}

#[tokio::test]
async fn carts_are_scoped_per_user() {
    let app = TestApp::new().await;
    let alice = unique_user("alice");
    let bob = unique_user("bob");

    let (_, body) = app
        .post("/api/cart", json!({"user_id": alice, "product_id": 6, "qty": 1}))
        .await;
    let item_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = app.get(&format!("/api/cart?user_id={bob}")).await;
    assert_eq!(body["data"]["cart"].as_array().unwrap().len(), 0);

    // Another user cannot touch the line.
    let (status, _) = app
        .put(&format!("/api/cart/{item_id}"), json!({"user_id": bob, "qty": 5}))
        .await;
    assert_eq!(status, 404);
    let (status, _) = app
        .delete(&format!("/api/cart/{item_id}?user_id={bob}"))
        .await;
    assert_eq!(status, 404);

    let (_, body) = app.get(&format!("/api/cart?user_id={alice}")).await;
    assert_eq!(body["data"]["cart"][0]["qty"], 1);
}

#[tokio::test]
async fn lines_for_deleted_products_drop_out_of_the_view() {
    let app = TestApp::new().await;
    let user = unique_user("orphan");
    app.insert_product(300, "Ephemeral Gadget", dec!(1500)).await;

    app.post("/api/cart", json!({"user_id": user, "product_id": 300, "qty": 1}))
        .await;
    app.post("/api/cart", json!({"user_id": user, "product_id": 1, "qty": 1}))
        .await;

    use sea_orm::EntityTrait;
    ecommart_api::entities::Product::delete_by_id(300)
        .exec(&*app.state.db)
        .await
        .unwrap();

    let (_, body) = app.get(&format!("/api/cart?user_id={user}")).await;
    let cart = body["data"]["cart"].as_array().unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0]["product_id"], 1);
    assert_eq!(dec_field(&body["data"], "subtotal"), dec!(29990));
}
