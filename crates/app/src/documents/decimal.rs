//! Stored Decimals
//!
//! Decimal values are persisted in the extended JSON form
//! `{"$numberDecimal": "99.99"}` so they never pass through a binary float.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use serde_json::{Map, Value};

/// Key of the extended JSON decimal wrapper.
pub const DECIMAL_KEY: &str = "$numberDecimal";

/// A [`Decimal`] that serializes to and from its stored document form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoredDecimal(pub Decimal);

impl StoredDecimal {
    #[must_use]
    pub fn into_inner(self) -> Decimal {
        self.0
    }

    /// Render as a stored JSON value.
    #[must_use]
    pub fn to_value(self) -> Value {
        let mut wrapper = Map::with_capacity(1);
        wrapper.insert(DECIMAL_KEY.to_string(), Value::String(self.0.to_string()));
        Value::Object(wrapper)
    }
}

impl From<Decimal> for StoredDecimal {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<StoredDecimal> for Decimal {
    fn from(value: StoredDecimal) -> Self {
        value.0
    }
}

impl Serialize for StoredDecimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StoredDecimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        read_decimal(&value)
            .map(Self)
            .ok_or_else(|| D::Error::custom(format!("invalid decimal value: {value}")))
    }
}

/// Read a decimal from any of the shapes a document may hold it in: the
/// extended JSON wrapper, a JSON number or a numeric string.
#[must_use]
pub fn read_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Object(map) => map.get(DECIMAL_KEY).and_then(read_decimal),
        Value::String(text) => parse_decimal(text),
        Value::Number(number) => parse_decimal(&number.to_string()),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
