//! The product record and its wire representation.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A product row as stored in the database and served over HTTP.
///
/// The serialized form is exactly these four fields; the JSON listing endpoint
/// returns an array of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Primary key, assigned by the database.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Free-form description.
    pub description: String,
}

/// A product that has not yet been persisted.
///
/// Used by seeding and the store API; the database assigns the `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Free-form description.
    pub description: String,
}

impl NewProduct {
    /// Creates a new unsaved product.
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_serializes_exactly_four_fields() {
        let product = Product {
            id: 1,
            name: "Widget".to_string(),
            price: 9.99,
            description: "A widget".to_string(),
        };

        let value = serde_json::to_value(&product).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert_eq!(object["id"], 1);
        assert_eq!(object["name"], "Widget");
        assert_eq!(object["price"], 9.99);
        assert_eq!(object["description"], "A widget");
    }

    #[test]
    fn product_round_trips_through_json() {
        let json = r#"{"id":7,"name":"Gadget","price":19.5,"description":"A gadget"}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, 7);
        assert_eq!(product.name, "Gadget");
        assert_eq!(product.price, 19.5);
    }
}
