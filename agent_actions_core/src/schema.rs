//! Typed input schemas for actions.
//!
//! An action declares its inputs once, as an ordered list of [`FieldSpec`]s.
//! The same declaration drives both sides of the contract: strict validation
//! of caller-supplied arguments, and the JSON Schema handed to host agent
//! frameworks so the model knows what to send.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};
use thiserror::Error;

const ADDRESS_PATTERN: &str = "^0x[0-9a-fA-F]{40}$";
const AMOUNT_PATTERN: &str = "^[0-9]+$";

static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(ADDRESS_PATTERN).expect("address pattern compiles"));
static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(AMOUNT_PATTERN).expect("amount pattern compiles"));

/// Semantic type of a single input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-form string.
    String,
    /// EVM address: `0x` followed by 40 hex digits.
    Address,
    /// Asset amount as a string holding a whole number of atomic units,
    /// greater than zero.
    Amount,
    /// Unsigned integer.
    Integer,
    /// true or false.
    Boolean,
    /// One of a fixed set of string literals.
    Enum(&'static [&'static str]),
}

impl FieldKind {
    fn expected(&self) -> &'static str {
        match self {
            FieldKind::String | FieldKind::Address | FieldKind::Amount | FieldKind::Enum(_) => {
                "a string"
            }
            FieldKind::Integer => "an unsigned integer",
            FieldKind::Boolean => "a boolean",
        }
    }
}

/// Why an input was rejected. Validation never partially applies: fields are
/// checked in declaration order and the first failure wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("input must be a JSON object")]
    NotAnObject,
    #[error("missing required field `{0}`")]
    MissingField(String),
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("field `{field}` must be {expected}")]
    WrongType { field: String, expected: &'static str },
    #[error("field `{field}` {constraint}")]
    Constraint { field: String, constraint: String },
}

/// One named input field: its kind, whether the caller must supply it, an
/// optional default applied when absent, and an optional length cap.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: &'static str,
    description: &'static str,
    kind: FieldKind,
    required: bool,
    default: Option<Value>,
    max_length: Option<usize>,
}

impl FieldSpec {
    pub fn required(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind,
            required: true,
            default: None,
            max_length: None,
        }
    }

    pub fn optional(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind,
            required: false,
            default: None,
            max_length: None,
        }
    }

    /// Value filled in when the caller omits the field.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Cap on the number of characters, counted as Unicode scalar values.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let field = self.name.to_string();
        match self.kind {
            FieldKind::String | FieldKind::Address | FieldKind::Amount | FieldKind::Enum(_) => {
                let Some(text) = value.as_str() else {
                    return Err(ValidationError::WrongType {
                        field,
                        expected: self.kind.expected(),
                    });
                };
                match self.kind {
                    FieldKind::Address => {
                        if !ADDRESS_RE.is_match(text) {
                            return Err(ValidationError::Constraint {
                                field,
                                constraint: "must be a 0x-prefixed 40-hex-digit address"
                                    .to_string(),
                            });
                        }
                    }
                    FieldKind::Amount => {
                        if !AMOUNT_RE.is_match(text) {
                            return Err(ValidationError::Constraint {
                                field,
                                constraint: "must be a whole number of atomic units".to_string(),
                            });
                        }
                        if text.bytes().all(|b| b == b'0') {
                            return Err(ValidationError::Constraint {
                                field,
                                constraint: "must be greater than zero".to_string(),
                            });
                        }
                    }
                    FieldKind::Enum(allowed) => {
                        if !allowed.contains(&text) {
                            return Err(ValidationError::Constraint {
                                field,
                                constraint: format!("must be one of: {}", allowed.join(", ")),
                            });
                        }
                    }
                    _ => {}
                }
                if let Some(max) = self.max_length {
                    if text.chars().count() > max {
                        return Err(ValidationError::Constraint {
                            field,
                            constraint: format!("must be at most {max} characters"),
                        });
                    }
                }
                Ok(())
            }
            FieldKind::Integer => {
                if value.as_u64().is_none() {
                    return Err(ValidationError::WrongType {
                        field,
                        expected: self.kind.expected(),
                    });
                }
                Ok(())
            }
            FieldKind::Boolean => {
                if !value.is_boolean() {
                    return Err(ValidationError::WrongType {
                        field,
                        expected: self.kind.expected(),
                    });
                }
                Ok(())
            }
        }
    }

    fn json_schema(&self) -> Value {
        let mut property = Map::new();
        match self.kind {
            FieldKind::String | FieldKind::Address | FieldKind::Amount | FieldKind::Enum(_) => {
                property.insert("type".to_string(), json!("string"));
            }
            FieldKind::Integer => {
                property.insert("type".to_string(), json!("integer"));
            }
            FieldKind::Boolean => {
                property.insert("type".to_string(), json!("boolean"));
            }
        }
        match self.kind {
            FieldKind::Address => {
                property.insert("pattern".to_string(), json!(ADDRESS_PATTERN));
            }
            FieldKind::Amount => {
                property.insert("pattern".to_string(), json!(AMOUNT_PATTERN));
            }
            FieldKind::Enum(allowed) => {
                property.insert("enum".to_string(), json!(allowed));
            }
            _ => {}
        }
        property.insert("description".to_string(), json!(self.description));
        if let Some(max) = self.max_length {
            property.insert("maxLength".to_string(), json!(max));
        }
        if let Some(default) = &self.default {
            property.insert("default".to_string(), default.clone());
        }
        Value::Object(property)
    }
}

/// Ordered, strict input declaration for one action.
///
/// Strictness is not optional: keys that no field declares are rejected, so
/// a misspelled argument fails loudly instead of being silently dropped.
/// Explicit `null` counts as absent and falls back to the default, if any.
#[derive(Debug, Clone, Default)]
pub struct InputSchema {
    fields: Vec<FieldSpec>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Check `raw` against every declared field, in declaration order, then
    /// reject any keys left over. On success the returned arguments have
    /// defaults already applied.
    pub fn validate(&self, raw: &Value) -> Result<ValidatedArgs, ValidationError> {
        let Some(raw_map) = raw.as_object() else {
            return Err(ValidationError::NotAnObject);
        };
        let mut values = Map::new();
        for spec in &self.fields {
            match raw_map.get(spec.name) {
                Some(value) if !value.is_null() => {
                    spec.check(value)?;
                    values.insert(spec.name.to_string(), value.clone());
                }
                _ => match (&spec.default, spec.required) {
                    (Some(default), _) => {
                        values.insert(spec.name.to_string(), default.clone());
                    }
                    (None, true) => {
                        return Err(ValidationError::MissingField(spec.name.to_string()))
                    }
                    (None, false) => {}
                },
            }
        }
        for key in raw_map.keys() {
            if !self.fields.iter().any(|spec| spec.name == key) {
                return Err(ValidationError::UnknownField(key.clone()));
            }
        }
        Ok(ValidatedArgs { values })
    }

    /// JSON Schema for host frameworks, mirroring exactly what `validate`
    /// enforces.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for spec in &self.fields {
            properties.insert(spec.name.to_string(), spec.json_schema());
            if spec.required {
                required.push(json!(spec.name));
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }
}

/// Arguments that passed validation: unknown keys rejected, every value
/// matched its field's kind, defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedArgs {
    values: Map<String, Value>,
}

impl ValidatedArgs {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The validated arguments as a JSON object, ready to hand to a handler.
    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}
