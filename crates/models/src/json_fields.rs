//! Lenient JSON field codecs for product payloads.
//!
//! Clients send prices and stock either as JSON numbers or as numeric text
//! (`"299.99"`, `"10"`). Values that cannot be read as the target type decode
//! to `None` instead of failing the whole body.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Loose {
    fn into_decimal(self) -> Option<Decimal> {
        match self {
            Loose::Int(i) => Some(Decimal::from(i)),
            // shortest round-trip text keeps 299.99 as 299.99
            Loose::Float(f) => Decimal::from_str(&f.to_string()).ok(),
            Loose::Text(s) => Decimal::from_str(s.trim()).ok(),
            Loose::Other(_) => None,
        }
    }

    fn into_i32(self) -> Option<i32> {
        let truncated = |f: f64| {
            let t = f.trunc();
            (t.is_finite() && t >= i32::MIN as f64 && t <= i32::MAX as f64).then_some(t as i32)
        };
        match self {
            Loose::Int(i) => i32::try_from(i).ok(),
            Loose::Float(f) => truncated(f),
            Loose::Text(s) => {
                let s = s.trim();
                match s.parse::<i64>() {
                    Ok(i) => i32::try_from(i).ok(),
                    Err(_) => s.parse::<f64>().ok().and_then(truncated),
                }
            }
            Loose::Other(_) => None,
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            Loose::Int(i) => Some(i.to_string()),
            Loose::Float(f) => Some(f.to_string()),
            Loose::Text(s) => Some(s),
            Loose::Other(_) => None,
        }
    }
}

/// `Decimal` written as a JSON number, read from a number or numeric text.
pub mod decimal {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let number: f64 = value
            .to_string()
            .parse()
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_f64(number)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        Loose::deserialize(deserializer)?
            .into_decimal()
            .ok_or_else(|| de::Error::custom("expected a decimal number"))
    }
}

pub fn optional_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
    Ok(Loose::deserialize(deserializer)?.into_decimal())
}

pub fn optional_i32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    Ok(Loose::deserialize(deserializer)?.into_i32())
}

/// Strings as given; numbers become their decimal text.
pub fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Loose::deserialize(deserializer)?.into_text())
}

/// A NULL column is served as `""`.
pub fn empty_if_null<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or_default())
}
