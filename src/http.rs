//! HTTP surface: router, request types, and handlers.
//!
//! Request bodies are deserialized into typed structs; unknown fields (for
//! example a caller-supplied `price` on an item) are silently dropped, which
//! is what keeps prices tamper-proof at this boundary. Order ids are opaque
//! strings to callers; anything that does not parse as an id is treated as
//! an order that does not exist.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Order, OrderStatus, ShippingAddress};
use crate::error::{ApiError, ApiResult};
use crate::service::{OrderService, RequestedItem};

#[derive(Clone)]
pub struct AppState {
    pub orders: OrderService,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/orders", get(list_orders).post(create_order))
        .route("/api/v1/orders/:id", get(get_order))
        .route("/api/v1/orders/user/:user_id", get(list_orders_for_user))
        .route("/api/v1/orders/:id/status", put(set_order_status))
        .route("/api/v1/orders/:id/cancel", put(cancel_order))
        .with_state(state)
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: String,
    #[validate(length(min = 1, message = "order must contain at least one item"))]
    pub items: Vec<OrderItemRequest>,
    #[serde(default)]
    pub shipping_address: ShippingAddress,
}

#[derive(Debug, Deserialize, serde::Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: String,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy", "service": "orders-service"}))
}

async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    request
        .validate()
        .map_err(|err| ApiError::Validation(err.to_string()))?;
    for item in &request.items {
        item.validate()
            .map_err(|err| ApiError::Validation(err.to_string()))?;
    }

    let items = request
        .items
        .into_iter()
        .map(|item| RequestedItem {
            product_id: item.product_id,
            quantity: item.quantity,
        })
        .collect();

    let order = state
        .orders
        .create_order(request.user_id, items, request.shipping_address)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn list_orders(State(state): State<AppState>) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list_orders().await?))
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.get_order(parse_order_id(&id)?).await?))
}

async fn list_orders_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list_orders_for_user(&user_id).await?))
}

async fn set_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> ApiResult<Json<Order>> {
    let id = parse_order_id(&id)?;
    let status: OrderStatus = request
        .status
        .parse()
        .map_err(|err: crate::domain::UnknownStatus| ApiError::Validation(err.to_string()))?;
    Ok(Json(state.orders.set_status(id, status).await?))
}

async fn cancel_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.orders.cancel(parse_order_id(&id)?).await?))
}

// Ids are opaque to callers; a malformed id is indistinguishable from a
// missing order.
fn parse_order_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::OrderNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogClient, CatalogError, ProductSnapshot};
    use crate::store::MemoryOrderStore;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct WidgetCatalog;

    #[async_trait]
    impl CatalogClient for WidgetCatalog {
        async fn lookup(&self, product_id: &str) -> Result<ProductSnapshot, CatalogError> {
            match product_id {
                "P1" => Ok(ProductSnapshot {
                    id: "P1".into(),
                    name: "Widget".into(),
                    price: Decimal::new(999, 2),
                }),
                other => Err(CatalogError::NotFound(other.to_string())),
            }
        }
    }

    fn app() -> Router {
        let orders = OrderService::new(
            Arc::new(WidgetCatalog),
            Arc::new(MemoryOrderStore::new()),
        );
        router(AppState { orders })
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn health_reports_service_name() {
        let app = app();
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "orders-service");
    }

    #[tokio::test]
    async fn create_order_returns_201_with_snapshot_body() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/orders",
            Some(json!({
                "userId": "u-1",
                "items": [{"productId": "P1", "quantity": 2}],
                "shippingAddress": {"city": "Lagos", "country": "NG"}
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "pending");
        assert_eq!(body["totalAmount"], json!(19.98));
        assert_eq!(body["items"][0]["productName"], "Widget");
        assert_eq!(body["items"][0]["price"], json!(9.99));
        assert_eq!(body["shippingAddress"]["city"], "Lagos");
        assert!(body["id"].is_string());
    }

    #[tokio::test]
    async fn forged_price_and_name_are_ignored() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/orders",
            Some(json!({
                "userId": "u-1",
                "items": [{"productId": "P1", "quantity": 1, "price": 0.01, "productName": "free"}]
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["items"][0]["price"], json!(9.99));
        assert_eq!(body["items"][0]["productName"], "Widget");
        assert_eq!(body["totalAmount"], json!(9.99));
    }

    #[tokio::test]
    async fn unknown_product_rejects_the_whole_order() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/orders",
            Some(json!({
                "userId": "u-1",
                "items": [
                    {"productId": "P1", "quantity": 1},
                    {"productId": "P2", "quantity": 1}
                ]
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("P2"));

        let (status, body) = send(&app, "GET", "/api/v1/orders", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn zero_quantity_is_a_validation_error() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/orders",
            Some(json!({
                "userId": "u-1",
                "items": [{"productId": "P1", "quantity": 0}]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn empty_items_are_rejected() {
        let app = app();
        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/orders",
            Some(json!({"userId": "u-1", "items": []})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn status_update_and_cancel_flow() {
        let app = app();
        let (_, created) = send(
            &app,
            "POST",
            "/api/v1/orders",
            Some(json!({
                "userId": "u-1",
                "items": [{"productId": "P1", "quantity": 2}]
            })),
        )
        .await;
        let id = created["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/v1/orders/{id}/status"),
            Some(json!({"status": "shipped"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "shipped");
        assert_eq!(body["totalAmount"], created["totalAmount"]);

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/v1/orders/{id}/cancel"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "cancelled");

        // Soft delete: still present in the user's order list.
        let (_, body) = send(&app, "GET", "/api/v1/orders/user/u-1", None).await;
        assert_eq!(body[0]["id"].as_str().unwrap(), id);
        assert_eq!(body[0]["status"], "cancelled");
    }

    #[tokio::test]
    async fn invalid_status_value_is_400() {
        let app = app();
        let (_, created) = send(
            &app,
            "POST",
            "/api/v1/orders",
            Some(json!({
                "userId": "u-1",
                "items": [{"productId": "P1", "quantity": 1}]
            })),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/v1/orders/{id}/status"),
            Some(json!({"status": "refunded"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("refunded"));
    }

    #[tokio::test]
    async fn missing_order_is_404_with_message_body() {
        let app = app();
        let missing = Uuid::now_v7();

        let (status, body) = send(&app, "GET", &format!("/api/v1/orders/{missing}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "order not found");

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/v1/orders/{missing}/status"),
            Some(json!({"status": "shipped"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Malformed ids look like missing orders, not server errors.
        let (status, _) = send(&app, "GET", "/api/v1/orders/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
