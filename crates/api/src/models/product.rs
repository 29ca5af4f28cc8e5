//! Product entity and payload types.

use serde::Serialize;
use serde_json::Value;
use shopledger_core::{Price, ProductId};

use crate::validate::{Fields, Presence, ValidationErrors};

/// A product record.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    #[serde(rename = "product_id")]
    pub id: ProductId,
    pub name: String,
    pub price: Price,
}

/// Validated payload for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
}

impl NewProduct {
    /// Validate a raw JSON body against the product field rules.
    ///
    /// # Errors
    ///
    /// Returns every violated field with a human-readable reason.
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(body);
        let name = fields.non_empty_string("name", Presence::Required, 255);
        let price = fields.price("price", Presence::Required);
        fields.finish()?;

        let (Some(name), Some(price)) = (name, price) else {
            return Err(ValidationErrors::single("_schema", "Invalid input type."));
        };
        Ok(Self { name, price })
    }
}

/// Validated partial update for a product.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Price>,
}

impl ProductPatch {
    /// Validate only the fields present in a raw JSON body.
    ///
    /// # Errors
    ///
    /// Returns every violated field with a human-readable reason.
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(body);
        let name = fields.non_empty_string("name", Presence::Optional, 255);
        let price = fields.price("price", Presence::Optional);
        fields.finish()?;

        Ok(Self { name, price })
    }
}
