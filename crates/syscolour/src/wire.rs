//! Lenient serde adapters for scheme document fields.
//!
//! Individual properties never fail a document: a colour that is not a
//! well-formed wire string, or a tint that is not a number, decodes to absent.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::colour::{Colour, NIL};

fn colour_from_value(value: &Value) -> Option<Colour> {
    value.as_str().and_then(Colour::parse_wire)
}

/// `Option<Colour>` as `"rgba(...)"` or `"nil"`.
pub(crate) mod optional {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Colour>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(colour) => serializer.serialize_str(&colour.to_wire()),
            None => serializer.serialize_str(NIL),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Colour>, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(colour_from_value))
    }
}

/// `Option<Vec<Colour>>`, accepting a bare value where a sequence belongs.
///
/// Malformed elements are dropped. `null` is absent, `[]` is empty.
pub(crate) mod sequence {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Vec<Colour>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<Colour>>, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => {
                Some(items.iter().filter_map(colour_from_value).collect())
            }
            Some(single @ Value::String(_)) => {
                Some(colour_from_value(&single).into_iter().collect())
            }
            Some(_) => None,
        })
    }
}

/// `Option<i64>` that truncates fractional numbers and drops anything else.
pub(crate) mod tint {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<i64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<i64>, D::Error> {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(integer_from_value))
    }

    fn integer_from_value(value: &Value) -> Option<i64> {
        if let Some(n) = value.as_i64() {
            return Some(n);
        }
        let f = value.as_f64()?.trunc();
        // i64::MAX is not exactly representable; the bound excludes it
        (f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
    }
}
