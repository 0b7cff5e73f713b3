//! Declarative field schemas shared by every resource.
//!
//! A schema is a list of field rules (`name` + `required`). It is used two ways:
//! - `validate` answers whether a submitted body carries every required field;
//! - `extract` projects a body onto the declared fields, dropping everything else.

use serde_json::{Map, Value as JsonValue};

/// Rule for a single field in a [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
}

impl FieldRule {
    pub const fn required(name: &'static str) -> Self {
        Self { name, required: true }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

/// An ordered set of field rules.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [FieldRule],
}

impl Schema {
    pub const fn new(fields: &'static [FieldRule]) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &'static [FieldRule] {
        self.fields
    }

    pub fn declares(&self, field: &str) -> bool {
        self.fields.iter().any(|rule| rule.name == field)
    }

    /// Returns true iff `candidate` is an object holding every required field.
    ///
    /// Presence is key presence: an explicit `null` counts as present.
    /// Keys the schema does not declare are ignored.
    pub fn validate(&self, candidate: &JsonValue) -> bool {
        let Some(obj) = candidate.as_object() else {
            return false;
        };
        self.fields
            .iter()
            .filter(|rule| rule.required)
            .all(|rule| obj.contains_key(rule.name))
    }

    /// Copies the declared fields present in `candidate` into a new object.
    pub fn extract(&self, candidate: &JsonValue) -> Map<String, JsonValue> {
        let mut out = Map::new();
        let Some(obj) = candidate.as_object() else {
            return out;
        };
        for rule in self.fields {
            if let Some(v) = obj.get(rule.name) {
                out.insert(rule.name.to_string(), v.clone());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCHEMA: Schema = Schema::new(&[
        FieldRule::required("userid"),
        FieldRule::required("businessid"),
        FieldRule::optional("caption"),
    ]);

    #[test]
    fn validate_requires_every_required_key() {
        assert!(SCHEMA.validate(&json!({ "userid": 1, "businessid": 2 })));
        assert!(!SCHEMA.validate(&json!({ "userid": 1 })));
        assert!(!SCHEMA.validate(&json!({ "caption": "x" })));
    }

    #[test]
    fn validate_ignores_unknown_keys_and_accepts_null() {
        assert!(SCHEMA.validate(&json!({ "userid": null, "businessid": 2, "extra": true })));
    }

    #[test]
    fn validate_rejects_non_objects() {
        assert!(!SCHEMA.validate(&json!([1, 2])));
        assert!(!SCHEMA.validate(&json!("userid")));
        assert!(!SCHEMA.validate(&JsonValue::Null));
    }

    #[test]
    fn extract_keeps_only_declared_present_keys() {
        let out = SCHEMA.extract(&json!({ "userid": 7, "businessid": 3, "_id": "abc", "id": 99 }));
        assert_eq!(JsonValue::Object(out), json!({ "userid": 7, "businessid": 3 }));
    }

    #[test]
    fn extract_does_not_default_missing_optionals() {
        let out = SCHEMA.extract(&json!({ "userid": 7 }));
        assert!(!out.contains_key("caption"));
        assert!(!out.contains_key("businessid"));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn extract_of_non_object_is_empty() {
        assert!(SCHEMA.extract(&json!(42)).is_empty());
    }
}
