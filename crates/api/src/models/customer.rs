//! Customer entity and payload types.

use serde::Serialize;
use serde_json::Value;
use shopledger_core::{CustomerId, Email};

use crate::validate::{Fields, Presence, ValidationErrors};

/// A customer record.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    #[serde(rename = "customer_id")]
    pub id: CustomerId,
    pub name: String,
    pub email: Email,
    pub phone: String,
}

/// Validated payload for creating a customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: Email,
    pub phone: String,
}

impl NewCustomer {
    /// Validate a raw JSON body against the customer field rules.
    ///
    /// # Errors
    ///
    /// Returns every violated field with a human-readable reason.
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(body);
        let name = fields.non_empty_string("name", Presence::Required, 255);
        let email = fields.email("email", Presence::Required);
        let phone = fields.string("phone", Presence::Required, 15);
        fields.finish()?;

        let (Some(name), Some(email), Some(phone)) = (name, email, phone) else {
            return Err(ValidationErrors::single("_schema", "Invalid input type."));
        };
        Ok(Self { name, email, phone })
    }
}

/// Validated partial update for a customer. Absent fields are left
/// untouched on the target record.
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<String>,
}

impl CustomerPatch {
    /// Validate only the fields present in a raw JSON body.
    ///
    /// # Errors
    ///
    /// Returns every violated field with a human-readable reason.
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(body);
        let name = fields.non_empty_string("name", Presence::Optional, 255);
        let email = fields.email("email", Presence::Optional);
        let phone = fields.string("phone", Presence::Optional, 15);
        fields.finish()?;

        Ok(Self { name, email, phone })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_requires_all_fields() {
        let errors = NewCustomer::from_json(&json!({})).unwrap_err();
        for field in ["name", "email", "phone"] {
            assert_eq!(
                errors.messages(field).unwrap(),
                ["Missing data for required field."]
            );
        }
    }

    #[test]
    fn create_rejects_empty_name() {
        let body = json!({"name": "", "email": "a@b.com", "phone": "123"});
        let errors = NewCustomer::from_json(&body).unwrap_err();
        assert!(errors.messages("name").is_some());
        assert!(errors.messages("email").is_none());
    }

    #[test]
    fn patch_accepts_a_subset_of_fields() {
        let patch = CustomerPatch::from_json(&json!({"phone": "555"})).unwrap();
        assert!(patch.name.is_none());
        assert!(patch.email.is_none());
        assert_eq!(patch.phone.as_deref(), Some("555"));
    }

    #[test]
    fn serializes_with_surrogate_id_key() {
        let customer = Customer {
            id: CustomerId::new(1),
            name: "Ada".to_owned(),
            email: Email::parse("ada@example.com").unwrap(),
            phone: "123".to_owned(),
        };
        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(
            value,
            json!({
                "customer_id": 1,
                "name": "Ada",
                "email": "ada@example.com",
                "phone": "123",
            })
        );
    }
}
