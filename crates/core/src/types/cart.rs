//! Shopping cart snapshot owned by the cart service.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{ProductId, Username};

/// A user's cart: product ID to quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub for_user: Option<Username>,
    #[serde(default)]
    pub products: HashMap<ProductId, i64>,
}

impl Cart {
    /// Quantity currently held for a product, if the cart lists it.
    #[must_use]
    pub fn quantity_of(&self, product_id: &str) -> Option<i64> {
        self.products.get(product_id).copied()
    }

    /// Total number of items across all products.
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.products.values().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.values().all(|&count| count <= 0)
    }
}
