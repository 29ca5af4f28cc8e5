//! Field-level validation of inbound JSON payloads.
//!
//! Each entity has a fixed set of field rules (type, required-ness,
//! length/range). Validation inspects the raw JSON body field by field and
//! collects every violation before returning, so the caller can report
//! everything wrong with a payload at once instead of stopping at the
//! first bad field.
//!
//! Partial-update mode falls out of [`Presence::Optional`]: absent fields
//! are skipped entirely, present fields are validated with the same rules
//! as on create.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use shopledger_core::{Email, Price};

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Whether a field must appear in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The field must be present; absence is a validation error.
    Required,
    /// The field may be absent; when absent it is skipped entirely.
    Optional,
}

/// Accumulated validation failures, keyed by field name.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Create an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an error set with a single message.
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    /// Record a failure for a field.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_owned()).or_default().push(message.into());
    }

    /// True when no failures have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for a field, if any.
    #[must_use]
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A view over the fields of a JSON object body, accumulating validation
/// errors as fields are extracted.
pub struct Fields<'a> {
    map: Option<&'a Map<String, Value>>,
    errors: ValidationErrors,
}

impl<'a> Fields<'a> {
    /// Wrap a raw JSON body.
    ///
    /// A non-object body is itself a validation error, recorded under the
    /// `_schema` pseudo-field; every subsequent lookup then reports the
    /// field as absent.
    #[must_use]
    pub fn new(body: &'a Value) -> Self {
        let map = body.as_object();
        let mut errors = ValidationErrors::new();
        if map.is_none() {
            errors.push("_schema", "Invalid input type.");
        }
        Self { map, errors }
    }

    /// Finish validation, returning every recorded failure.
    ///
    /// # Errors
    ///
    /// Returns the accumulated `ValidationErrors` if any field failed.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    /// A string field with a maximum length. Empty strings are accepted.
    pub fn string(&mut self, name: &str, presence: Presence, max_len: usize) -> Option<String> {
        let value = self.lookup(name, presence)?;
        let Some(s) = value.as_str() else {
            self.errors.push(name, "Not a valid string.");
            return None;
        };
        if s.chars().count() > max_len {
            self.errors
                .push(name, format!("Longer than maximum length {max_len}."));
            return None;
        }
        Some(s.to_owned())
    }

    /// A string field that must contain at least one character.
    pub fn non_empty_string(
        &mut self,
        name: &str,
        presence: Presence,
        max_len: usize,
    ) -> Option<String> {
        let s = self.string(name, presence, max_len)?;
        if s.is_empty() {
            self.errors.push(name, "Shorter than minimum length 1.");
            return None;
        }
        Some(s)
    }

    /// An email address field.
    pub fn email(&mut self, name: &str, presence: Presence) -> Option<Email> {
        let value = self.lookup(name, presence)?;
        let Some(s) = value.as_str() else {
            self.errors.push(name, "Not a valid string.");
            return None;
        };
        match Email::parse(s) {
            Ok(email) => Some(email),
            Err(e) => {
                self.errors.push(name, e.to_string());
                None
            }
        }
    }

    /// A password field with a minimum length.
    pub fn password(&mut self, name: &str, presence: Presence) -> Option<String> {
        let s = self.string(name, presence, 255)?;
        if s.chars().count() < MIN_PASSWORD_LENGTH {
            self.errors.push(
                name,
                format!("Shorter than minimum length {MIN_PASSWORD_LENGTH}."),
            );
            return None;
        }
        Some(s)
    }

    /// A non-negative numeric price field.
    pub fn price(&mut self, name: &str, presence: Presence) -> Option<Price> {
        let value = self.lookup(name, presence)?;
        let Some(amount) = value.as_f64() else {
            self.errors.push(name, "Not a valid number.");
            return None;
        };
        match Price::from_f64(amount) {
            Ok(price) => Some(price),
            Err(shopledger_core::PriceError::Negative) => {
                self.errors
                    .push(name, "Must be greater than or equal to 0.");
                None
            }
            Err(_) => {
                self.errors.push(name, "Not a valid number.");
                None
            }
        }
    }

    /// An integer id field.
    pub fn id(&mut self, name: &str, presence: Presence) -> Option<i32> {
        let value = self.lookup(name, presence)?;
        match value.as_i64().and_then(|n| i32::try_from(n).ok()) {
            Some(id) => Some(id),
            None => {
                self.errors.push(name, "Not a valid integer.");
                None
            }
        }
    }

    /// An ISO `YYYY-MM-DD` date field.
    pub fn date(&mut self, name: &str, presence: Presence) -> Option<NaiveDate> {
        let value = self.lookup(name, presence)?;
        let Some(s) = value.as_str() else {
            self.errors.push(name, "Not a valid date.");
            return None;
        };
        match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.errors.push(name, "Not a valid date.");
                None
            }
        }
    }

    /// A non-empty list of integer ids.
    pub fn id_list(&mut self, name: &str, presence: Presence) -> Option<Vec<i32>> {
        let value = self.lookup(name, presence)?;
        let Some(items) = value.as_array() else {
            self.errors.push(name, "Not a valid list of ids.");
            return None;
        };
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            match item.as_i64().and_then(|n| i32::try_from(n).ok()) {
                Some(id) => ids.push(id),
                None => {
                    self.errors.push(name, "Not a valid list of ids.");
                    return None;
                }
            }
        }
        if ids.is_empty() {
            self.errors
                .push(name, "Shorter than minimum length 1.");
            return None;
        }
        Some(ids)
    }

    /// Fetch the raw value for a field, recording an error when a required
    /// field is absent. JSON `null` counts as absent.
    fn lookup(&mut self, name: &str, presence: Presence) -> Option<&'a Value> {
        let value = self.map.and_then(|m| m.get(name)).filter(|v| !v.is_null());
        if value.is_none() && presence == Presence::Required {
            self.errors.push(name, "Missing data for required field.");
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collects_every_violation_before_returning() {
        let body = json!({"name": "", "price": -1.5});
        let mut fields = Fields::new(&body);
        fields.non_empty_string("name", Presence::Required, 255);
        fields.price("price", Presence::Required);
        fields.email("email", Presence::Required);

        let errors = fields.finish().unwrap_err();
        assert_eq!(
            errors.messages("name").unwrap(),
            ["Shorter than minimum length 1."]
        );
        assert_eq!(
            errors.messages("price").unwrap(),
            ["Must be greater than or equal to 0."]
        );
        assert_eq!(
            errors.messages("email").unwrap(),
            ["Missing data for required field."]
        );
    }

    #[test]
    fn optional_fields_are_skipped_when_absent() {
        let body = json!({"name": "Widget"});
        let mut fields = Fields::new(&body);
        let name = fields.non_empty_string("name", Presence::Optional, 255);
        let price = fields.price("price", Presence::Optional);

        assert_eq!(name.as_deref(), Some("Widget"));
        assert!(price.is_none());
        assert!(fields.finish().is_ok());
    }

    #[test]
    fn optional_fields_are_still_validated_when_present() {
        let body = json!({"price": "not a number"});
        let mut fields = Fields::new(&body);
        fields.price("price", Presence::Optional);

        let errors = fields.finish().unwrap_err();
        assert_eq!(errors.messages("price").unwrap(), ["Not a valid number."]);
    }

    #[test]
    fn null_counts_as_absent() {
        let body = json!({"phone": null});
        let mut fields = Fields::new(&body);
        fields.string("phone", Presence::Required, 15);

        let errors = fields.finish().unwrap_err();
        assert_eq!(
            errors.messages("phone").unwrap(),
            ["Missing data for required field."]
        );
    }

    #[test]
    fn non_object_bodies_are_schema_errors() {
        let body = json!([1, 2, 3]);
        let mut fields = Fields::new(&body);
        fields.id("customer_id", Presence::Required);

        let errors = fields.finish().unwrap_err();
        assert_eq!(errors.messages("_schema").unwrap(), ["Invalid input type."]);
        assert_eq!(
            errors.messages("customer_id").unwrap(),
            ["Missing data for required field."]
        );
    }

    #[test]
    fn dates_must_be_iso_formatted() {
        let body = json!({"date": "05/07/2024"});
        let mut fields = Fields::new(&body);
        assert!(fields.date("date", Presence::Required).is_none());
        assert!(fields.finish().is_err());

        let body = json!({"date": "2024-07-05"});
        let mut fields = Fields::new(&body);
        let date = fields.date("date", Presence::Required).unwrap();
        assert_eq!(date.to_string(), "2024-07-05");
        assert!(fields.finish().is_ok());
    }

    #[test]
    fn id_lists_reject_empty_and_fractional_values() {
        let body = json!({"products": []});
        let mut fields = Fields::new(&body);
        assert!(fields.id_list("products", Presence::Required).is_none());
        assert!(fields.finish().is_err());

        let body = json!({"products": [1, 2.5]});
        let mut fields = Fields::new(&body);
        assert!(fields.id_list("products", Presence::Required).is_none());
        assert!(fields.finish().is_err());

        let body = json!({"products": [1, 2]});
        let mut fields = Fields::new(&body);
        assert_eq!(
            fields.id_list("products", Presence::Required).unwrap(),
            vec![1, 2]
        );
    }

    #[test]
    fn errors_serialize_as_a_field_map() {
        let errors = ValidationErrors::single("name", "Missing data for required field.");
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            value,
            json!({"name": ["Missing data for required field."]})
        );
    }
}
