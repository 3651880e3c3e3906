//! `serialize_with` helpers that refuse NaN and infinities.
//!
//! serde_json writes a non-finite `f64` as `null`, which no `f64` field
//! reads back. These helpers fail the encode instead.

use std::collections::BTreeMap;

use serde::ser::{Error, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

fn check<E: Error>(x: f64) -> Result<f64, E> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(E::custom(format!("non-finite value {x}")))
    }
}

pub fn scalar<S: Serializer>(x: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(check::<S::Error>(*x)?)
}

pub fn seq<S: Serializer>(xs: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(xs.len()))?;
    for x in xs {
        seq.serialize_element(&check::<S::Error>(*x)?)?;
    }
    seq.end()
}

pub fn nested<S: Serializer>(rows: &[Vec<f64>], serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(rows.len()))?;
    for row in rows {
        seq.serialize_element(&Row(row))?;
    }
    seq.end()
}

pub fn map<K, S>(entries: &BTreeMap<K, f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    K: Serialize,
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (k, v) in entries {
        map.serialize_entry(k, &check::<S::Error>(*v)?)?;
    }
    map.end()
}

struct Row<'a>(&'a [f64]);

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        seq(self.0, serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Reading {
        #[serde(serialize_with = "scalar")]
        x: f64,
        #[serde(serialize_with = "seq")]
        xs: Vec<f64>,
    }

    #[test]
    fn finite_values_encode_as_numbers() {
        let v = serde_json::to_value(Reading { x: 1.5, xs: vec![0.0, -2.0] }).unwrap();
        assert_eq!(v, serde_json::json!({"x": 1.5, "xs": [0.0, -2.0]}));
    }

    #[test]
    fn non_finite_values_fail_to_encode() {
        assert!(serde_json::to_value(Reading { x: f64::NAN, xs: vec![] }).is_err());
        assert!(serde_json::to_value(Reading { x: 0.0, xs: vec![1.0, f64::NEG_INFINITY] }).is_err());
    }
}
