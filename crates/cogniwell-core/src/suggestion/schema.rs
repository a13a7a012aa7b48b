//! Request schema validation.
//!
//! Each suggestion kind declares its input contract as a static
//! [`Schema`]: named fields with a primitive type, a required flag, an
//! optional enum set, and an optional default. [`validate`] checks a raw
//! JSON object against a schema and produces the defaults-applied map the
//! prompt renderer consumes, or a [`ValidationError`] naming the
//! offending field. Pure function, no side effects.

use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Primitive type of a schema field.
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    /// UTF-8 string; required strings must be non-empty
    String,
    /// Boolean
    Bool,
    /// String restricted to a fixed set of values
    Enum(&'static [&'static str]),
}

impl FieldType {
    fn expected_name(&self) -> &'static str {
        match self {
            FieldType::String | FieldType::Enum(_) => "string",
            FieldType::Bool => "boolean",
        }
    }
}

/// Default applied when an optional field is absent.
#[derive(Debug, Clone, Copy)]
pub enum DefaultValue {
    Str(&'static str),
    Bool(bool),
}

impl DefaultValue {
    fn to_value(self) -> Value {
        match self {
            DefaultValue::Str(s) => Value::String(s.to_string()),
            DefaultValue::Bool(b) => Value::Bool(b),
        }
    }
}

/// One field of a request schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
    pub default: Option<DefaultValue>,
}

/// Declared shape of a suggestion request.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Validate a raw request object against a schema.
///
/// Returns the validated map with defaults applied for absent optional
/// fields. Fields not declared in the schema are dropped. An absent or
/// empty optional string counts as "not provided", so conditional
/// template sections stay out of the prompt entirely.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the field when a required field
/// is missing or empty, a value has the wrong primitive type, or an enum
/// value is outside its declared set.
pub fn validate(raw: &Value, schema: &Schema) -> Result<Map<String, Value>, ValidationError> {
    let obj = raw.as_object().ok_or_else(|| ValidationError::NotAnObject {
        schema: schema.name.to_string(),
    })?;

    let mut out = Map::new();
    for field in schema.fields {
        let value = match obj.get(field.name) {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        };

        let Some(value) = value else {
            if let Some(default) = field.default {
                out.insert(field.name.to_string(), default.to_value());
            } else if field.required {
                return Err(ValidationError::MissingField {
                    field: field.name.to_string(),
                });
            }
            continue;
        };

        match field.ty {
            FieldType::String => {
                let s = value.as_str().ok_or_else(|| ValidationError::WrongType {
                    field: field.name.to_string(),
                    expected: field.ty.expected_name().to_string(),
                })?;
                if s.is_empty() {
                    if field.required {
                        return Err(ValidationError::EmptyField {
                            field: field.name.to_string(),
                        });
                    }
                    // Empty optional string: treat as absent.
                    if let Some(default) = field.default {
                        out.insert(field.name.to_string(), default.to_value());
                    }
                    continue;
                }
                out.insert(field.name.to_string(), Value::String(s.to_string()));
            }
            FieldType::Bool => {
                let b = value.as_bool().ok_or_else(|| ValidationError::WrongType {
                    field: field.name.to_string(),
                    expected: field.ty.expected_name().to_string(),
                })?;
                out.insert(field.name.to_string(), Value::Bool(b));
            }
            FieldType::Enum(allowed) => {
                let s = value.as_str().ok_or_else(|| ValidationError::WrongType {
                    field: field.name.to_string(),
                    expected: field.ty.expected_name().to_string(),
                })?;
                if !allowed.contains(&s) {
                    return Err(ValidationError::NotInEnum {
                        field: field.name.to_string(),
                        value: s.to_string(),
                        allowed: allowed.join(", "),
                    });
                }
                out.insert(field.name.to_string(), Value::String(s.to_string()));
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static TEST_SCHEMA: Schema = Schema {
        name: "test",
        fields: &[
            FieldSpec {
                name: "summary",
                ty: FieldType::String,
                required: true,
                default: None,
            },
            FieldSpec {
                name: "adapt",
                ty: FieldType::Bool,
                required: true,
                default: None,
            },
            FieldSpec {
                name: "tone",
                ty: FieldType::Enum(&["motivational", "neutral", "gentle"]),
                required: false,
                default: Some(DefaultValue::Str("neutral")),
            },
            FieldSpec {
                name: "mood",
                ty: FieldType::String,
                required: false,
                default: None,
            },
        ],
    };

    #[test]
    fn valid_request_passes_with_defaults() {
        let raw = json!({"summary": "three tasks done", "adapt": true});
        let out = validate(&raw, &TEST_SCHEMA).unwrap();
        assert_eq!(out["summary"], "three tasks done");
        assert_eq!(out["adapt"], true);
        assert_eq!(out["tone"], "neutral"); // default applied
        assert!(!out.contains_key("mood")); // absent, no default
    }

    #[test]
    fn missing_required_field_names_field() {
        let raw = json!({"adapt": true});
        let err = validate(&raw, &TEST_SCHEMA).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                field: "summary".to_string()
            }
        );
    }

    #[test]
    fn empty_required_string_rejected() {
        let raw = json!({"summary": "", "adapt": false});
        let err = validate(&raw, &TEST_SCHEMA).unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyField {
                field: "summary".to_string()
            }
        );
    }

    #[test]
    fn wrong_type_names_field_and_expectation() {
        let raw = json!({"summary": 42, "adapt": true});
        let err = validate(&raw, &TEST_SCHEMA).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongType {
                field: "summary".to_string(),
                expected: "string".to_string()
            }
        );

        let raw = json!({"summary": "ok", "adapt": "yes"});
        let err = validate(&raw, &TEST_SCHEMA).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongType {
                field: "adapt".to_string(),
                expected: "boolean".to_string()
            }
        );
    }

    #[test]
    fn enum_value_outside_set_rejected() {
        let raw = json!({"summary": "ok", "adapt": true, "tone": "sarcastic"});
        let err = validate(&raw, &TEST_SCHEMA).unwrap_err();
        match err {
            ValidationError::NotInEnum { field, value, .. } => {
                assert_eq!(field, "tone");
                assert_eq!(value, "sarcastic");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn null_counts_as_absent() {
        let raw = json!({"summary": "ok", "adapt": true, "mood": null});
        let out = validate(&raw, &TEST_SCHEMA).unwrap();
        assert!(!out.contains_key("mood"));
    }

    #[test]
    fn empty_optional_string_treated_as_absent() {
        let raw = json!({"summary": "ok", "adapt": true, "mood": ""});
        let out = validate(&raw, &TEST_SCHEMA).unwrap();
        assert!(!out.contains_key("mood"));
    }

    #[test]
    fn undeclared_fields_are_dropped() {
        let raw = json!({"summary": "ok", "adapt": true, "extra": "ignored"});
        let out = validate(&raw, &TEST_SCHEMA).unwrap();
        assert!(!out.contains_key("extra"));
    }

    #[test]
    fn non_object_request_rejected() {
        let err = validate(&json!([1, 2, 3]), &TEST_SCHEMA).unwrap_err();
        assert!(matches!(err, ValidationError::NotAnObject { .. }));
    }
}
