//! Order workflow: creation, lifecycle, and read accessors.
//!
//! Order creation is the only path with real cross-service logic. Every
//! requested item is validated against the catalog, in input order, and the
//! whole request aborts on the first lookup failure with nothing persisted.
//! Item name and price always come from the catalog response, never from the
//! caller, so a client cannot set its own prices.

use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::catalog::CatalogClient;
use crate::domain::{Order, OrderItem, OrderStatus, ShippingAddress};
use crate::error::{ApiError, ApiResult};
use crate::store::{NewOrder, OrderStore};

/// A `{product_id, quantity}` pair from the caller. The only two fields of a
/// requested item that are trusted.
#[derive(Clone, Debug)]
pub struct RequestedItem {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Clone)]
pub struct OrderService {
    catalog: Arc<dyn CatalogClient>,
    store: Arc<dyn OrderStore>,
}

impl OrderService {
    pub fn new(catalog: Arc<dyn CatalogClient>, store: Arc<dyn OrderStore>) -> Self {
        Self { catalog, store }
    }

    /// Validate every requested item against the catalog, snapshot name and
    /// price, accumulate the total, then persist once. Fail-fast: the first
    /// lookup failure aborts the whole order.
    pub async fn create_order(
        &self,
        user_id: String,
        items: Vec<RequestedItem>,
        shipping_address: ShippingAddress,
    ) -> ApiResult<Order> {
        let mut snapshots = Vec::with_capacity(items.len());
        let mut total = Decimal::ZERO;

        for requested in &items {
            let product = match self.catalog.lookup(&requested.product_id).await {
                Ok(product) => product,
                Err(err) => {
                    tracing::warn!(
                        product_id = %requested.product_id,
                        error = %err,
                        "aborting order creation: product lookup failed"
                    );
                    return Err(ApiError::ProductUnavailable(requested.product_id.clone()));
                }
            };

            let item = OrderItem {
                product_id: requested.product_id.clone(),
                product_name: product.name,
                quantity: requested.quantity,
                price: product.price,
            };
            total += item.subtotal();
            snapshots.push(item);
        }

        let order = self
            .store
            .insert(NewOrder {
                user_id,
                items: snapshots,
                total_amount: total,
                shipping_address,
            })
            .await?;

        tracing::info!(order_id = %order.id, total = %order.total_amount, "order created");
        Ok(order)
    }

    pub async fn get_order(&self, id: Uuid) -> ApiResult<Order> {
        self.store.get(id).await?.ok_or(ApiError::OrderNotFound)
    }

    pub async fn list_orders(&self) -> ApiResult<Vec<Order>> {
        Ok(self.store.list().await?)
    }

    pub async fn list_orders_for_user(&self, user_id: &str) -> ApiResult<Vec<Order>> {
        Ok(self.store.list_for_user(user_id).await?)
    }

    /// Overwrite the order status. Any status may follow any other; no
    /// transition graph is enforced.
    pub async fn set_status(&self, id: Uuid, status: OrderStatus) -> ApiResult<Order> {
        self.store
            .set_status(id, status)
            .await?
            .ok_or(ApiError::OrderNotFound)
    }

    /// Soft delete: the order stays queryable with `cancelled` status.
    pub async fn cancel(&self, id: Uuid) -> ApiResult<Order> {
        self.set_status(id, OrderStatus::Cancelled).await
    }
}
