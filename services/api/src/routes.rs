//! Gateway routes

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use common::{models::ShippingAddress, product::{ProductId, ProductPatch}};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    middleware::request_logger,
    models::{ShippingResponse, navigation_menu},
    state::AppState,
};

/// Create the router for the gateway
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/:id",
            put(update_product).delete(delete_product),
        )
        .route("/api/posts", get(list_posts))
        .route("/api/menu", get(menu))
        .route("/api/shipping", post(submit_shipping))
        .nest("/api/auth", auth::routes::create_router())
        .layer(middleware::from_fn(request_logger))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "storefront-gateway"
    }))
}

/// Remote catalog followed by local products
pub async fn list_products(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let products = state
        .catalog
        .list()
        .await
        .map_err(|e| ApiError::catalog("Failed to fetch products", e))?;

    Ok(Json(products))
}

/// Create a local product
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let product = state
        .catalog
        .create(payload)
        .await
        .map_err(|e| ApiError::catalog("Failed to add product", e))?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a local product, or forward the update to the remote catalog
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let view = state
        .catalog
        .update(id, payload)
        .await
        .map_err(|e| ApiError::catalog("Failed to update product", e))?;

    Ok(Json(view))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ApiResult<impl IntoResponse> {
    let response = state
        .catalog
        .delete(id)
        .await
        .map_err(|e| ApiError::catalog("Failed to delete product", e))?;

    Ok(Json(response))
}

/// Proxy the remote post feed
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let posts = state
        .posts
        .list_posts()
        .await
        .map_err(|source| ApiError::Upstream {
            message: "Failed to fetch posts",
            source,
        })?;

    Ok(Json(posts))
}

/// Static navigation menu
pub async fn menu() -> impl IntoResponse {
    Json(navigation_menu())
}

/// Record a shipping submission
pub async fn submit_shipping(
    State(state): State<AppState>,
    payload: Result<Json<ShippingAddress>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    if let Some(field) = payload.missing_field() {
        info!("Rejected shipping submission, missing {}", field);
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    }

    let record = state
        .shipping
        .append(payload)
        .await
        .map_err(|e| ApiError::internal("Failed to save shipping info", e))?;

    let on_record = state
        .shipping
        .count()
        .await
        .map_err(|e| ApiError::internal("Failed to save shipping info", e))?;
    info!(
        "Shipping info saved at {} ({} on record)",
        record.created_at, on_record
    );

    Ok((
        StatusCode::CREATED,
        Json(ShippingResponse {
            success: true,
            message: "Shipping info saved".to_string(),
            data: record.address,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use auth::{
        AuthService, password::PasswordHasher, repositories::InMemoryUserRepository,
    };
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request},
    };
    use common::{models::Post, product::Product};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        catalog::{Catalog, ProductDefaults},
        remote::{MockCatalogSource, MockPostsSource, RemoteError},
        repositories::{InMemoryProductRepository, InMemoryShippingRepository, ShippingRepository},
    };

    fn remote_product(id: ProductId) -> Product {
        serde_json::from_value(json!({
            "id": id,
            "title": format!("remote {id}"),
            "price": 9.5,
            "description": "from the catalog",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img.jpg",
            "rating": {"rate": 4.1, "count": 120}
        }))
        .unwrap()
    }

    struct TestApp {
        router: Router,
        shipping: Arc<InMemoryShippingRepository>,
    }

    fn test_app(remote: MockCatalogSource, posts: MockPostsSource) -> TestApp {
        let shipping = Arc::new(InMemoryShippingRepository::new());
        let state = AppState {
            catalog: Catalog::new(
                Arc::new(remote),
                Arc::new(InMemoryProductRepository::new(1000)),
                ProductDefaults {
                    category: "custom".to_string(),
                    image: "placeholder".to_string(),
                },
            ),
            posts: Arc::new(posts),
            shipping: shipping.clone(),
            auth: AuthService::new(
                Arc::new(InMemoryUserRepository::new()),
                PasswordHasher::with_cost(8, 1, 1).unwrap(),
            ),
        };

        TestApp {
            router: create_router(state),
            shipping,
        }
    }

    fn offline_catalog() -> MockCatalogSource {
        let mut remote = MockCatalogSource::new();
        remote
            .expect_list_products()
            .returning(|| Err(RemoteError::Status(502)));
        remote
            .expect_update_product()
            .returning(|_, _| Err(RemoteError::Status(502)));
        remote
            .expect_delete_product()
            .returning(|_| Err(RemoteError::Status(502)));
        remote
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_app(MockCatalogSource::new(), MockPostsSource::new());

        let (status, body) = send(&app.router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_products_degrade_to_local_when_remote_is_down() {
        let app = test_app(offline_catalog(), MockPostsSource::new());

        let (status, created) = send(
            &app.router,
            Method::POST,
            "/api/products",
            Some(json!({"title": "Handmade mug", "price": 12})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1000);
        assert_eq!(created["category"], "custom");
        assert!(created["createdAt"].is_string());

        let (status, products) = send(&app.router, Method::GET, "/api/products", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(products.as_array().unwrap().len(), 1);
        assert_eq!(products[0]["title"], "Handmade mug");
    }

    #[tokio::test]
    async fn test_products_list_remote_then_local() {
        let mut remote = MockCatalogSource::new();
        remote
            .expect_list_products()
            .returning(|| Ok(vec![remote_product(1), remote_product(2)]));
        let app = test_app(remote, MockPostsSource::new());

        send(&app.router, Method::POST, "/api/products", Some(json!({"title": "Local"}))).await;

        let (_, products) = send(&app.router, Method::GET, "/api/products", None).await;
        let ids: Vec<i64> = products
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 1000]);
        assert_eq!(products[0]["rating"]["count"], 120);
    }

    #[tokio::test]
    async fn test_create_product_rejects_negative_price() {
        let app = test_app(offline_catalog(), MockPostsSource::new());

        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/products",
            Some(json!({"title": "Bad", "price": -3})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Price must be a non-negative number");
    }

    #[tokio::test]
    async fn test_update_local_product_keeps_path_id() {
        let app = test_app(offline_catalog(), MockPostsSource::new());
        send(&app.router, Method::POST, "/api/products", Some(json!({"title": "Mug", "price": 4}))).await;

        let (status, body) = send(
            &app.router,
            Method::PUT,
            "/api/products/1000",
            Some(json!({"id": 77, "price": 6})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1000);
        assert_eq!(body["title"], "Mug");
        assert_eq!(body["price"], 6.0);
        assert!(body["updatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_update_remote_product_echoes_when_remote_fails() {
        let app = test_app(offline_catalog(), MockPostsSource::new());

        let (status, body) = send(
            &app.router,
            Method::PUT,
            "/api/products/3",
            Some(json!({"title": "Renamed"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 3, "title": "Renamed"}));
    }

    #[tokio::test]
    async fn test_delete_reports_success_for_unknown_product() {
        let app = test_app(offline_catalog(), MockPostsSource::new());

        let (status, body) = send(&app.router, Method::DELETE, "/api/products/12", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Product deleted successfully"}));
    }

    #[tokio::test]
    async fn test_delete_local_product_removes_it() {
        let app = test_app(offline_catalog(), MockPostsSource::new());
        send(&app.router, Method::POST, "/api/products", Some(json!({"title": "Mug"}))).await;

        let (_, body) = send(&app.router, Method::DELETE, "/api/products/1000", None).await;
        assert_eq!(body["product"]["title"], "Mug");

        let (_, products) = send(&app.router, Method::GET, "/api/products", None).await;
        assert!(products.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_posts_are_proxied() {
        let mut posts = MockPostsSource::new();
        posts.expect_list_posts().returning(|| {
            Ok(vec![Post {
                user_id: 1,
                id: 1,
                title: "hello".to_string(),
                body: "world".to_string(),
            }])
        });
        let app = test_app(MockCatalogSource::new(), posts);

        let (status, body) = send(&app.router, Method::GET, "/api/posts", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["userId"], 1);
    }

    #[tokio::test]
    async fn test_posts_failure_is_generic_500() {
        let mut posts = MockPostsSource::new();
        posts
            .expect_list_posts()
            .returning(|| Err(RemoteError::Status(401)));
        let app = test_app(MockCatalogSource::new(), posts);

        let (status, body) = send(&app.router, Method::GET, "/api/posts", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to fetch posts"}));
    }

    #[tokio::test]
    async fn test_menu_is_static() {
        let app = test_app(MockCatalogSource::new(), MockPostsSource::new());

        let (status, body) = send(&app.router, Method::GET, "/api/menu", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 7);
        assert_eq!(body[0], json!({"label": "Home", "path": "/"}));
    }

    #[tokio::test]
    async fn test_shipping_missing_zip_is_rejected() {
        let app = test_app(MockCatalogSource::new(), MockPostsSource::new());

        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/shipping",
            Some(json!({
                "name": "Ada",
                "address": "1 Loop St",
                "city": "London",
                "state": "LDN",
                "phone": "555-0100"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "All fields are required"}));
        assert_eq!(app.shipping.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_shipping_is_recorded() {
        let app = test_app(MockCatalogSource::new(), MockPostsSource::new());
        let address = json!({
            "name": "Ada",
            "address": "1 Loop St",
            "city": "London",
            "state": "LDN",
            "zip": "N1",
            "phone": "555-0100"
        });

        let (status, body) =
            send(&app.router, Method::POST, "/api/shipping", Some(address.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Shipping info saved");
        assert_eq!(body["data"], address);
        assert_eq!(app.shipping.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_auth_is_nested_under_api() {
        let app = test_app(MockCatalogSource::new(), MockPostsSource::new());
        let user = json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "password": "engine"
        });

        let (status, body) =
            send(&app.router, Method::POST, "/api/auth/register", Some(user)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["user"].get("password").is_none());

        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/auth/login",
            Some(json!({"email": "ada@example.com", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid email or password");

        let (_, body) = send(&app.router, Method::GET, "/api/auth/users", None).await;
        assert_eq!(body["count"], 1);
    }

    #[tokio::test]
    async fn test_shipping_accepts_numeric_zip_and_phone() {
        let app = test_app(MockCatalogSource::new(), MockPostsSource::new());

        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/shipping",
            Some(json!({
                "name": "Ada",
                "address": "1 Loop St",
                "city": "Springfield",
                "state": "IL",
                "zip": 62701,
                "phone": 5550100
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["zip"], "62701");
        assert_eq!(body["data"]["phone"], "5550100");
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_json_400s() {
        let app = test_app(offline_catalog(), MockPostsSource::new());

        for uri in ["/api/products", "/api/shipping"] {
            let request = Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from("{\"title\": "))
                .unwrap();
            let response = app.router.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body, json!({"error": "Invalid request body"}));
        }

        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/products",
            Some(json!({"title": "Mug", "price": "cheap"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid request body"}));
    }

    #[tokio::test]
    async fn test_numeric_string_price_is_accepted() {
        let app = test_app(offline_catalog(), MockPostsSource::new());

        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/products",
            Some(json!({"title": "Mug", "price": "9.99"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["price"], 9.99);
    }

    #[tokio::test]
    async fn test_id_counter_never_overflows() {
        let app = test_app(offline_catalog(), MockPostsSource::new());

        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/products",
            Some(json!({"id": i64::MAX, "title": "max"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Product id is out of range");

        let (status, _) = send(
            &app.router,
            Method::POST,
            "/api/products",
            Some(json!({"id": i64::MAX - 1, "title": "last"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/products",
            Some(json!({"title": "next"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to add product"}));

        // The gateway keeps serving after the failed create
        let (status, products) = send(&app.router, Method::GET, "/api/products", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(products.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_explicit_zero_id_gets_a_counter_id() {
        let app = test_app(offline_catalog(), MockPostsSource::new());

        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/products",
            Some(json!({"id": 0, "title": "zero"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1000);
    }
}
