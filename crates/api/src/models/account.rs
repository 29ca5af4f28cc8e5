//! Customer account entity and payload types.
//!
//! Account responses never include the password or its hash; the stored
//! credential is an argon2id hash produced by [`crate::services::password`].

use serde::Serialize;
use serde_json::Value;
use shopledger_core::{AccountId, CustomerId};

use crate::validate::{Fields, Presence, ValidationErrors};

/// A customer account record, as serialized in responses.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    #[serde(rename = "account_id")]
    pub id: AccountId,
    pub username: String,
    pub customer_id: CustomerId,
}

/// Validated payload for creating an account. Holds the plain-text
/// password; hashing happens at the handler boundary.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub customer_id: i32,
}

impl NewAccount {
    /// Validate a raw JSON body against the account field rules.
    ///
    /// # Errors
    ///
    /// Returns every violated field with a human-readable reason.
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(body);
        let username = fields.non_empty_string("username", Presence::Required, 255);
        let password = fields.password("password", Presence::Required);
        let customer_id = fields.id("customer_id", Presence::Required);
        fields.finish()?;

        let (Some(username), Some(password), Some(customer_id)) =
            (username, password, customer_id)
        else {
            return Err(ValidationErrors::single("_schema", "Invalid input type."));
        };
        Ok(Self {
            username,
            password,
            customer_id,
        })
    }
}

/// Validated partial update for an account.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub username: Option<String>,
    pub password: Option<String>,
    pub customer_id: Option<i32>,
}

impl AccountPatch {
    /// Validate only the fields present in a raw JSON body.
    ///
    /// # Errors
    ///
    /// Returns every violated field with a human-readable reason.
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(body);
        let username = fields.non_empty_string("username", Presence::Optional, 255);
        let password = fields.password("password", Presence::Optional);
        let customer_id = fields.id("customer_id", Presence::Optional);
        fields.finish()?;

        Ok(Self {
            username,
            password,
            customer_id,
        })
    }
}
