//! Product record owned by the products service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    /// Unit price. Sent by the service as a JSON number.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub cost: Decimal,
    #[serde(default)]
    pub description: String,
    /// Image file name, relative to the frontend's image directory.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub on_offer: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_service_json() {
        let product: Product = serde_json::from_str(
            r#"{"id":"4","name":"Hat","cost":12.5,"description":"Warm","image":"hat.jpg","onOffer":true}"#,
        )
        .unwrap();
        assert_eq!(product.id.as_str(), "4");
        assert_eq!(product.cost, Decimal::new(125, 1));
        assert!(product.on_offer);
    }

    #[test]
    fn test_product_cost_serializes_as_number() {
        let product = Product {
            id: ProductId::new("1"),
            name: "Mug".to_string(),
            cost: Decimal::new(8, 0),
            description: String::new(),
            image: String::new(),
            on_offer: false,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert!(json["cost"].is_number());
        assert_eq!(json["onOffer"], false);
    }
}
