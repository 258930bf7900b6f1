//! Order records owned by the orders service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OrderId, OrderStatus, Product, Username};

/// A submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub title: String,
    /// Order total. Sent by the service as a JSON number.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub for_user: Option<Username>,
}

/// One product and its quantity within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: Product,
    pub count: i64,
}
