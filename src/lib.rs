//! Order management service for the minishop e-commerce demo.
//!
//! Sits behind the API gateway next to the product and user services.
//! Order creation validates every requested item against the product
//! service, snapshots the catalog name and price onto the order (so records
//! stay accurate when catalog prices change later), and persists
//! all-or-nothing. Orders then move through a simple status lifecycle and
//! are never deleted; cancellation is a status write.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod service;
pub mod store;

pub use domain::{Order, OrderItem, OrderStatus, ShippingAddress};
pub use error::{ApiError, ApiResult};
pub use service::OrderService;
