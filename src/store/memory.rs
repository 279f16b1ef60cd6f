//! In-memory order store for tests and local development.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{Order, OrderStatus};
use crate::store::{NewOrder, OrderStore, StoreError};

#[derive(Default)]
pub struct MemoryOrderStore {
    // Insertion order doubles as creation order.
    orders: RwLock<Vec<Order>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn insert(&self, order: NewOrder) -> Result<Order, StoreError> {
        let now = Utc::now();
        let order = Order {
            id: Uuid::now_v7(),
            user_id: order.user_id,
            items: order.items,
            total_amount: order.total_amount,
            status: OrderStatus::Pending,
            shipping_address: order.shipping_address,
            created_at: now,
            updated_at: now,
        };
        self.orders.write().await.push(order.clone());
        Ok(order)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.read().await.iter().find(|o| o.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.orders.read().await.iter().rev().cloned().collect())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .rev()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, StoreError> {
        let mut orders = self.orders.write().await;
        match orders.iter_mut().find(|o| o.id == id) {
            Some(order) => {
                order.status = status;
                order.updated_at = Utc::now();
                Ok(Some(order.clone()))
            }
            None => Ok(None),
        }
    }
}
