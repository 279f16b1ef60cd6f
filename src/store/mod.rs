//! Order record store.
//!
//! Orders are keyed by a generated id with a secondary lookup path by
//! `user_id`. Records are never deleted; cancellation is a status write.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{Order, OrderItem, OrderStatus, ShippingAddress};

pub mod memory;
pub mod postgres;

pub use memory::MemoryOrderStore;
pub use postgres::PgOrderStore;

/// Write model for a validated order about to be persisted. Items already
/// carry catalog snapshots and `total_amount` is their exact sum.
#[derive(Clone, Debug)]
pub struct NewOrder {
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub shipping_address: ShippingAddress,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order with `pending` status, assigning id and
    /// timestamps. Item ordering is preserved.
    async fn insert(&self, order: NewOrder) -> Result<Order, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Order>, StoreError>;

    /// All orders, newest first.
    async fn list(&self) -> Result<Vec<Order>, StoreError>;

    /// All orders for a user, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Order>, StoreError>;

    /// Overwrite the status and refresh `updated_at`. Returns `None` when
    /// the id does not resolve.
    async fn set_status(&self, id: Uuid, status: OrderStatus)
        -> Result<Option<Order>, StoreError>;
}
