use std::fmt;
use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};

/// Declared type of a field in a function signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Null,
    Boolean,
    Integer,
    Long,
    Float,
    Double,
    String,
    Binary,
    Bag,
    Tuple,
}

impl LogicalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::Null => "Null",
            LogicalType::Boolean => "Boolean",
            LogicalType::Integer => "Integer",
            LogicalType::Long => "Long",
            LogicalType::Float => "Float",
            LogicalType::Double => "Double",
            LogicalType::String => "String",
            LogicalType::Binary => "Binary",
            LogicalType::Bag => "Bag",
            LogicalType::Tuple => "Tuple",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            LogicalType::Integer | LogicalType::Long | LogicalType::Float | LogicalType::Double
        )
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Null" => Ok(LogicalType::Null),
            "Boolean" => Ok(LogicalType::Boolean),
            "Integer" | "Int" => Ok(LogicalType::Integer),
            "Long" => Ok(LogicalType::Long),
            "Float" => Ok(LogicalType::Float),
            "Double" => Ok(LogicalType::Double),
            "String" | "Chararray" => Ok(LogicalType::String),
            "Binary" | "Bytearray" => Ok(LogicalType::Binary),
            "Bag" => Ok(LogicalType::Bag),
            "Tuple" => Ok(LogicalType::Tuple),
            _ => Err(()),
        }
    }
}

/// A single loosely-typed value as handed over by the loading layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Utf8(String),
    Binary(Vec<u8>),
}

impl ScalarValue {
    pub fn logical_type(&self) -> LogicalType {
        match self {
            ScalarValue::Null => LogicalType::Null,
            ScalarValue::Boolean(_) => LogicalType::Boolean,
            ScalarValue::Int32(_) => LogicalType::Integer,
            ScalarValue::Int64(_) => LogicalType::Long,
            ScalarValue::Float32(_) => LogicalType::Float,
            ScalarValue::Float64(_) => LogicalType::Double,
            ScalarValue::Utf8(_) => LogicalType::String,
            ScalarValue::Binary(_) => LogicalType::Binary,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            ScalarValue::Null => JsonValue::Null,
            ScalarValue::Boolean(b) => JsonValue::Bool(*b),
            ScalarValue::Int32(i) => JsonValue::Number(Number::from(*i)),
            ScalarValue::Int64(i) => JsonValue::Number(Number::from(*i)),
            ScalarValue::Float32(f) => Number::from_f64(*f as f64)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            ScalarValue::Float64(f) => Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            ScalarValue::Utf8(s) => JsonValue::String(s.clone()),
            ScalarValue::Binary(bytes) => JsonValue::String(BASE64_STANDARD.encode(bytes)),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::Int32(i) => Some(*i as i64),
            ScalarValue::Int64(i) => Some(*i),
            ScalarValue::Utf8(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Strict float view: only the numeric variants, no text parsing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Int32(i) => Some(*i as f64),
            ScalarValue::Int64(i) => Some(*i as f64),
            ScalarValue::Float32(f) => Some(*f as f64),
            ScalarValue::Float64(f) => Some(*f),
            _ => None,
        }
    }

    /// Textual form used when a value must be re-parsed.
    pub fn to_string_repr(&self) -> String {
        match self {
            ScalarValue::Null => String::new(),
            ScalarValue::Boolean(b) => b.to_string(),
            ScalarValue::Int32(i) => i.to_string(),
            ScalarValue::Int64(i) => i.to_string(),
            ScalarValue::Float32(f) => f.to_string(),
            ScalarValue::Float64(f) => f.to_string(),
            ScalarValue::Utf8(s) => s.clone(),
            ScalarValue::Binary(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Float64(value)
    }
}

impl From<Option<f64>> for ScalarValue {
    fn from(value: Option<f64>) -> Self {
        value.map(ScalarValue::Float64).unwrap_or(ScalarValue::Null)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Int64(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Utf8(value.to_string())
    }
}

impl From<JsonValue> for ScalarValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => ScalarValue::Null,
            JsonValue::Bool(b) => ScalarValue::Boolean(b),
            JsonValue::Number(num) => {
                if let Some(i) = num.as_i64() {
                    ScalarValue::Int64(i)
                } else if let Some(f) = num.as_f64() {
                    ScalarValue::Float64(f)
                } else {
                    ScalarValue::Utf8(num.to_string())
                }
            }
            JsonValue::String(s) => ScalarValue::Utf8(s),
            JsonValue::Array(_) | JsonValue::Object(_) => {
                // Nested values are kept verbatim and later rejected by coercion
                ScalarValue::Utf8(value.to_string())
            }
        }
    }
}

impl From<&ScalarValue> for JsonValue {
    fn from(value: &ScalarValue) -> Self {
        value.to_json()
    }
}

impl Serialize for ScalarValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ScalarValue::Null => serializer.serialize_unit(),
            ScalarValue::Boolean(b) => serializer.serialize_bool(*b),
            ScalarValue::Int32(i) => serializer.serialize_i32(*i),
            ScalarValue::Int64(i) => serializer.serialize_i64(*i),
            ScalarValue::Float32(f) => serializer.serialize_f32(*f),
            ScalarValue::Float64(f) => serializer.serialize_f64(*f),
            ScalarValue::Utf8(s) => serializer.serialize_str(s),
            ScalarValue::Binary(bytes) => serializer.serialize_str(&BASE64_STANDARD.encode(bytes)),
        }
    }
}

impl<'de> Deserialize<'de> for ScalarValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = JsonValue::deserialize(deserializer)?;
        Ok(ScalarValue::from(json))
    }
}
