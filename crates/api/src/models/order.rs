//! Order entity and payload types.
//!
//! An order references one customer and a set of products through the
//! association table. Payload product lists are normalized to a sorted,
//! deduplicated set here so the persistence layer always works with set
//! semantics.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use shopledger_core::{CustomerId, OrderId, ProductId};

use crate::validate::{Fields, Presence, ValidationErrors};

/// An order record with its associated product ids.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    #[serde(rename = "order_id")]
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub date: NaiveDate,
    pub products: Vec<ProductId>,
}

/// Validated payload for creating an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: i32,
    pub date: NaiveDate,
    pub products: Vec<i32>,
}

impl NewOrder {
    /// Validate a raw JSON body against the order field rules.
    ///
    /// # Errors
    ///
    /// Returns every violated field with a human-readable reason, including
    /// an empty `products` list.
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(body);
        let customer_id = fields.id("customer_id", Presence::Required);
        let date = fields.date("date", Presence::Required);
        let products = fields.id_list("products", Presence::Required);
        fields.finish()?;

        let (Some(customer_id), Some(date), Some(products)) = (customer_id, date, products)
        else {
            return Err(ValidationErrors::single("_schema", "Invalid input type."));
        };
        Ok(Self {
            customer_id,
            date,
            products: normalize(products),
        })
    }
}

/// Validated partial update for an order. A present `products` list means
/// "replace the entire association set"; an absent one leaves the
/// associations untouched.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub customer_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub products: Option<Vec<i32>>,
}

impl OrderPatch {
    /// Validate only the fields present in a raw JSON body.
    ///
    /// # Errors
    ///
    /// Returns every violated field with a human-readable reason.
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(body);
        let customer_id = fields.id("customer_id", Presence::Optional);
        let date = fields.date("date", Presence::Optional);
        let products = fields.id_list("products", Presence::Optional);
        fields.finish()?;

        Ok(Self {
            customer_id,
            date,
            products: products.map(normalize),
        })
    }
}

/// Sort and deduplicate a product id list.
fn normalize(mut ids: Vec<i32>) -> Vec<i32> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_rejects_an_empty_product_list() {
        let body = json!({"customer_id": 1, "date": "2024-07-05", "products": []});
        let errors = NewOrder::from_json(&body).unwrap_err();
        assert!(errors.messages("products").is_some());
    }

    #[test]
    fn create_normalizes_the_product_set() {
        let body = json!({"customer_id": 1, "date": "2024-07-05", "products": [3, 1, 3, 2]});
        let order = NewOrder::from_json(&body).unwrap();
        assert_eq!(order.products, vec![1, 2, 3]);
        assert_eq!(order.date.to_string(), "2024-07-05");
    }

    #[test]
    fn patch_distinguishes_absent_from_present_products() {
        let patch = OrderPatch::from_json(&json!({"date": "2024-08-01"})).unwrap();
        assert!(patch.products.is_none());

        let patch = OrderPatch::from_json(&json!({"products": [2, 3]})).unwrap();
        assert_eq!(patch.products, Some(vec![2, 3]));
    }

    #[test]
    fn serializes_with_nested_product_ids_and_iso_date() {
        let order = Order {
            id: OrderId::new(4),
            customer_id: CustomerId::new(1),
            date: NaiveDate::from_ymd_opt(2024, 7, 5).unwrap(),
            products: vec![ProductId::new(10)],
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({
                "order_id": 4,
                "customer_id": 1,
                "date": "2024-07-05",
                "products": [10],
            })
        );
    }
}
