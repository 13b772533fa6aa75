//! Conversions from common document formats into [`Value`].
//!
//! JSON numbers become `Int` when they fit in an `i64` and `Float`
//! otherwise. TOML datetimes have no dedicated node shape and are carried as
//! their RFC 3339 string form.

use crate::error::TypeError;
use crate::value::{Mapping, Value};

impl TryFrom<serde_json::Value> for Value {
    type Error = TypeError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        Ok(match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(
                    n.as_f64()
                        .ok_or_else(|| TypeError::UnrepresentableNumber(n.to_string()))?,
                ),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::Sequence(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            serde_json::Value::Object(map) => Value::Mapping(
                map.into_iter()
                    .map(|(k, v)| Ok((k, Value::try_from(v)?)))
                    .collect::<Result<Mapping, TypeError>>()?,
            ),
        })
    }
}

impl From<toml::Value> for Value {
    fn from(toml: toml::Value) -> Self {
        match toml {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Int(i),
            toml::Value::Float(f) => Value::Float(f),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::String(dt.to_string()),
            toml::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            toml::Value::Table(table) => Value::Mapping(
                table
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Value {
    /// Parse a JSON document.
    pub fn from_json_str(input: &str) -> Result<Self, TypeError> {
        let json: serde_json::Value =
            serde_json::from_str(input).map_err(|e| TypeError::Parse(e.to_string()))?;
        Self::try_from(json)
    }

    /// Parse a TOML document. The root is always a mapping.
    pub fn from_toml_str(input: &str) -> Result<Self, TypeError> {
        let table: toml::Table = input
            .parse()
            .map_err(|e: toml::de::Error| TypeError::Parse(e.to_string()))?;
        Ok(Self::from(toml::Value::Table(table)))
    }
}
