//! Core types for the Dapr Store.
//!
//! This module provides the wire schemas for each backend service.

pub mod cart;
pub mod id;
pub mod order;
pub mod product;
pub mod status;
pub mod user;

pub use cart::Cart;
pub use id::*;
pub use order::{LineItem, Order};
pub use product::Product;
pub use status::OrderStatus;
pub use user::User;
