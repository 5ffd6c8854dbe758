use std::sync::Arc;
use std::time::Duration;

use auth::{AuthService, password::PasswordHasher, repositories::InMemoryUserRepository};
use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use common::{models::ShippingAddress, product::ProductPatch};
use serde_json::{Value, json};
use storefront::{GatewayClient, StorefrontError, client::RegisterForm};
use tokio::net::TcpListener;

async fn list_products() -> impl IntoResponse {
    Json(json!([
        {"id": 1, "title": "Backpack", "price": 109.95, "category": "men's clothing",
         "rating": {"rate": 3.9, "count": 120}},
        {"id": 1000, "title": "Mug", "price": 4.0, "category": "custom",
         "createdAt": "2024-01-01T00:00:00Z"}
    ]))
}

async fn create_product(Json(payload): Json<Value>) -> impl IntoResponse {
    let mut product = payload;
    product["id"] = json!(1001);
    (StatusCode::CREATED, Json(product))
}

async fn update_product(Path(id): Path<i64>, Json(payload): Json<Value>) -> impl IntoResponse {
    let mut product = payload;
    product["id"] = json!(id);
    Json(product)
}

async fn delete_product() -> impl IntoResponse {
    Json(json!({"message": "Product deleted successfully"}))
}

async fn list_posts() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Failed to fetch posts"})),
    )
}

async fn submit_shipping(Json(address): Json<Value>) -> impl IntoResponse {
    (
        StatusCode::CREATED,
        Json(json!({"success": true, "message": "Shipping info saved", "data": address})),
    )
}

async fn spawn_gateway() -> GatewayClient {
    let auth = AuthService::new(
        Arc::new(InMemoryUserRepository::new()),
        PasswordHasher::with_cost(8, 1, 1).unwrap(),
    );

    let app = Router::new()
        .route("/health", get(|| async { Json(json!({"status": "ok"})) }))
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/:id", put(update_product).delete(delete_product))
        .route("/api/posts", get(list_posts))
        .route("/api/shipping", post(submit_shipping))
        .nest("/api/auth", auth::routes::create_router())
        .with_state(auth);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    GatewayClient::new(&format!("http://{addr}/"), Duration::from_secs(5)).unwrap()
}

fn ada() -> RegisterForm {
    RegisterForm {
        first_name: "A".to_string(),
        last_name: "B".to_string(),
        email: "a@b.com".to_string(),
        password: "x".to_string(),
    }
}

#[tokio::test]
async fn test_products_round_trip() {
    let client = spawn_gateway().await;
    client.health().await.unwrap();

    let products = client.products().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].rating.map(|r| r.count), Some(120));
    assert!(products[1].created_at.is_some());

    let created = client
        .create_product(&ProductPatch {
            title: Some("Lamp".to_string()),
            price: Some(20.0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id, 1001);
    assert_eq!(created.title, "Lamp");

    let updated = client
        .update_product(
            3,
            &ProductPatch {
                title: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, Some(3));

    let deleted = client.delete_product(3).await.unwrap();
    assert_eq!(deleted.message, "Product deleted successfully");
    assert!(deleted.product.is_none());
}

#[tokio::test]
async fn test_register_then_login() {
    let client = spawn_gateway().await;

    let user = client.register(&ada()).await.unwrap();
    assert_eq!(user.email, "a@b.com");

    let logged_in = client.login("a@b.com", "x").await.unwrap();
    assert_eq!(logged_in.id, user.id);
}

#[tokio::test]
async fn test_auth_errors_carry_gateway_message() {
    let client = spawn_gateway().await;
    client.register(&ada()).await.unwrap();

    let duplicate = client.register(&ada()).await;
    assert!(matches!(
        duplicate,
        Err(StorefrontError::Api { status: 400, ref message })
            if message == "User with this email already exists"
    ));

    let wrong = client.login("a@b.com", "nope").await;
    let unknown = client.login("z@b.com", "x").await;
    for result in [wrong, unknown] {
        assert!(matches!(
            result,
            Err(StorefrontError::Api { status: 401, ref message })
                if message == "Invalid email or password"
        ));
    }
}

#[tokio::test]
async fn test_error_field_is_used_when_no_message() {
    let client = spawn_gateway().await;

    let result = client.posts().await;
    assert!(matches!(
        result,
        Err(StorefrontError::Api { status: 500, ref message }) if message == "Failed to fetch posts"
    ));
}

#[tokio::test]
async fn test_shipping_submission() {
    let client = spawn_gateway().await;
    let address = ShippingAddress {
        name: Some("Ada".to_string()),
        address: Some("1 Loop St".to_string()),
        city: Some("London".to_string()),
        state: Some("LDN".to_string()),
        zip: Some("N1".to_string()),
        phone: Some("555-0100".to_string()),
    };

    let saved = client.submit_shipping(&address).await.unwrap();
    assert_eq!(saved, address);
}
