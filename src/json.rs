//! Null-preserving JSON encoding shared by every serializable core type.
//!
//! An absent value encodes to `null` and `null` (or a missing field)
//! decodes back to `None`, never to an empty value.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::{encode_error, Result};

/// Encodes `value`, mapping `None` to `Value::Null`. A NaN or infinite
/// entry fails with `Unencodable` rather than turning into `null`.
pub fn to_json<T: Serialize>(value: Option<&T>) -> Result<Value> {
    match value {
        Some(v) => serde_json::to_value(v).map_err(encode_error),
        None => Ok(Value::Null),
    }
}

/// Decodes `json`, mapping a missing field or `Value::Null` to `None`.
/// A present value of the wrong shape is `MalformedSerializedForm`.
pub fn from_json<T: DeserializeOwned>(json: Option<&Value>) -> Result<Option<T>> {
    match json {
        None | Some(Value::Null) => Ok(None),
        Some(v) => Ok(Some(T::deserialize(v)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_round_trips_as_absent() {
        let encoded = to_json::<Vec<f64>>(None).unwrap();
        assert_eq!(encoded, Value::Null);
        let decoded: Option<Vec<f64>> = from_json(Some(&encoded)).unwrap();
        assert!(decoded.is_none());
        let missing: Option<Vec<f64>> = from_json(None).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let bad = json!({"not": "an array"});
        let err = from_json::<Vec<f64>>(Some(&bad)).unwrap_err();
        assert!(matches!(err, crate::error::RangerError::MalformedSerializedForm(_)));
    }
}
