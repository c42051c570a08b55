use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::{CanonicalizeError, Number};

/// Broad classification of a [`Value`], used at every comparison site.
///
/// ```
/// # use stackdiff_core::{Kind, Value};
/// assert_eq!(Value::Null.kind(), Kind::Primitive);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// Strings, numbers, booleans, `null`, and absent values.
    Primitive,
    /// Ordered sequences.
    Array,
    /// Key/value mappings.
    Object,
}

/// Represents the canonical JSON-like data model used by the diff engine.
///
/// Objects are insertion-ordered: the order keys were discovered in the
/// source document is the order they render in. Comparison ignores key
/// order; rendering depends on it.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Sentinel representing the absence of a value.
    Absent,
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number represented as IEEE-754 double precision.
    Number(Number),
    /// JSON string.
    String(String),
    /// JSON array.
    Array(Vec<Value>),
    /// JSON object with insertion-ordered keys.
    Object(IndexMap<String, Value>),
}

impl Value {
    /// Parses a JSON string into the canonical value representation.
    ///
    /// Whitespace-only input canonicalizes to [`Value::Absent`].
    ///
    /// ```
    /// # use stackdiff_core::Value;
    /// let value = Value::from_json_str("{\"hello\":\"world\"}")?;
    /// assert!(matches!(value, Value::Object(_)));
    /// # Ok::<(), stackdiff_core::CanonicalizeError>(())
    /// ```
    pub fn from_json_str(input: &str) -> Result<Self, CanonicalizeError> {
        if input.trim().is_empty() {
            return Ok(Self::Absent);
        }
        let value: JsonValue = serde_json::from_str(input)?;
        Self::from_json_value(value)
    }

    /// Parses a YAML string into the canonical value representation.
    ///
    /// ```
    /// # use stackdiff_core::Value;
    /// let value = Value::from_yaml_str("---\nStatus: Enabled\n")?;
    /// assert!(matches!(value, Value::Object(_)));
    /// # Ok::<(), stackdiff_core::CanonicalizeError>(())
    /// ```
    pub fn from_yaml_str(input: &str) -> Result<Self, CanonicalizeError> {
        if input.trim().is_empty() {
            return Ok(Self::Absent);
        }
        let value: YamlValue = serde_yaml::from_str(input)?;
        Self::from_yaml_value(value)
    }

    /// Converts a serde JSON value into a [`Value`].
    pub fn from_json_value(value: JsonValue) -> Result<Self, CanonicalizeError> {
        match value {
            JsonValue::Null => Ok(Self::Null),
            JsonValue::Bool(v) => Ok(Self::Bool(v)),
            JsonValue::Number(num) => {
                let text = num.to_string();
                let Some(as_f64) = num.as_f64() else {
                    return Err(CanonicalizeError::NumberOutOfRange { value: text });
                };
                Ok(Self::Number(Number::new(as_f64)?))
            }
            JsonValue::String(s) => Ok(Self::String(s)),
            JsonValue::Array(values) => {
                let mut items = Vec::with_capacity(values.len());
                for value in values {
                    items.push(Self::from_json_value(value)?);
                }
                Ok(Self::Array(items))
            }
            JsonValue::Object(map) => {
                let mut object = IndexMap::with_capacity(map.len());
                for (key, value) in map {
                    object.insert(key, Self::from_json_value(value)?);
                }
                Ok(Self::Object(object))
            }
        }
    }

    fn from_yaml_value(value: YamlValue) -> Result<Self, CanonicalizeError> {
        match value {
            YamlValue::Null => Ok(Self::Null),
            YamlValue::Bool(v) => Ok(Self::Bool(v)),
            YamlValue::Number(num) => {
                if let Some(f) = num.as_f64() {
                    return Ok(Self::Number(Number::new(f)?));
                }
                Err(CanonicalizeError::NumberOutOfRange { value: num.to_string() })
            }
            YamlValue::String(s) => Ok(Self::String(s)),
            YamlValue::Sequence(seq) => {
                let mut items = Vec::with_capacity(seq.len());
                for value in seq {
                    items.push(Self::from_yaml_value(value)?);
                }
                Ok(Self::Array(items))
            }
            YamlValue::Mapping(map) => {
                let mut object = IndexMap::with_capacity(map.len());
                for (key, value) in map {
                    let key = match key {
                        YamlValue::String(s) => s,
                        other => {
                            return Err(CanonicalizeError::NonStringYamlKey {
                                found: format!("{other:?}"),
                            });
                        }
                    };
                    object.insert(key, Self::from_yaml_value(value)?);
                }
                Ok(Self::Object(object))
            }
            YamlValue::Tagged(tagged) => {
                Err(CanonicalizeError::UnsupportedYamlTag { tag: tagged.tag.to_string() })
            }
        }
    }

    /// Converts the value back into a serde JSON value when representable.
    ///
    /// Returns `None` when the value contains the `Absent` sentinel (either
    /// at the root or nested within arrays/objects) because
    /// `serde_json::Value` cannot represent the absence of a value.
    #[must_use]
    pub fn to_json_value(&self) -> Option<JsonValue> {
        match self {
            Self::Absent => None,
            Self::Null => Some(JsonValue::Null),
            Self::Bool(v) => Some(JsonValue::Bool(*v)),
            Self::Number(n) => Some(JsonValue::Number(n.to_json_number())),
            Self::String(s) => Some(JsonValue::String(s.clone())),
            Self::Array(values) => {
                let mut result = Vec::with_capacity(values.len());
                for value in values {
                    result.push(value.to_json_value()?);
                }
                Some(JsonValue::Array(result))
            }
            Self::Object(map) => {
                let mut object = serde_json::Map::new();
                for (key, value) in map {
                    object.insert(key.clone(), value.to_json_value()?);
                }
                Some(JsonValue::Object(object))
            }
        }
    }

    /// Classifies the value for comparison purposes.
    ///
    /// Total over every value shape; `null` and absent values classify as
    /// primitive.
    ///
    /// ```
    /// # use stackdiff_core::{Kind, Value};
    /// let value = Value::from_json_str("[1,2]")?;
    /// assert_eq!(value.kind(), Kind::Array);
    /// # Ok::<(), stackdiff_core::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Array(_) => Kind::Array,
            Self::Object(_) => Kind::Object,
            _ => Kind::Primitive,
        }
    }

    /// Indicates whether this value is the absence sentinel.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Formats the value as a compact JSON literal.
    ///
    /// Strings keep their quotes, `null` renders as the literal `null`, and
    /// numbers use minimal integer formatting. The absence sentinel formats
    /// as an empty string since it has no JSON spelling.
    ///
    /// ```
    /// # use stackdiff_core::Value;
    /// let value = Value::from_json_str("\"world\"")?;
    /// assert_eq!(value.to_literal(), "\"world\"");
    /// # Ok::<(), stackdiff_core::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn to_literal(&self) -> String {
        match self {
            Self::Absent => String::new(),
            Self::Null => "null".to_string(),
            Self::Bool(v) => v.to_string(),
            Self::Number(n) => n.to_json_number().to_string(),
            Self::String(s) => serde_json::to_string(s).expect("serializing string"),
            other => match other.to_json_value() {
                Some(value) => serde_json::to_string(&value).expect("serializing value"),
                None => String::new(),
            },
        }
    }

    /// Computes the structural diff between two values.
    ///
    /// ```
    /// # use stackdiff_core::Value;
    /// let before = Value::from_json_str("1").unwrap();
    /// let after = Value::from_json_str("2").unwrap();
    /// let diff = before.diff(&after);
    /// assert!(diff.has_changes());
    /// ```
    #[must_use]
    pub fn diff(&self, other: &Self) -> crate::Diff {
        crate::diff::diff_values(self, other)
    }
}

impl TryFrom<JsonValue> for Value {
    type Error = CanonicalizeError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        Self::from_json_value(value)
    }
}
