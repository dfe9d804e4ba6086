//! Lenient numeric fields.
//!
//! Decimal columns come back from the backend as strings (`"320.00"`), integer
//! columns as plain numbers. Both are accepted; anything that does not parse
//! as a finite number is a deserialization error.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Int(i64),
    Float(f64),
    Text(String),
}

fn to_f64<E: de::Error>(raw: Raw) -> Result<f64, E> {
    let value = match raw {
        Raw::Int(i) => i as f64,
        Raw::Float(f) => f,
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| E::custom(format!("expected a number, found {:?}", s)))?,
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(E::custom("expected a finite number"))
    }
}

fn to_i64<E: de::Error>(raw: Raw) -> Result<i64, E> {
    match raw {
        Raw::Int(i) => Ok(i),
        Raw::Text(s) => match s.trim().parse::<i64>() {
            Ok(i) => Ok(i),
            Err(_) => whole(to_f64(Raw::Text(s))?),
        },
        other => whole(to_f64(other)?),
    }
}

fn whole<E: de::Error>(f: f64) -> Result<i64, E> {
    if f.fract() != 0.0 {
        return Err(E::custom(format!("expected a whole number, found {}", f)));
    }
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if f < i64::MIN as f64 || f >= i64::MAX as f64 {
        return Err(E::custom(format!("{} does not fit in a 64-bit integer", f)));
    }
    Ok(f as i64)
}

pub fn f64_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    to_f64(Raw::deserialize(deserializer)?)
}

pub fn i64_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    to_i64(Raw::deserialize(deserializer)?)
}

pub fn opt_f64_lenient<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    Option::<Raw>::deserialize(deserializer)?.map(to_f64).transpose()
}

/// Missing or null counts as zero
pub fn f64_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(opt_f64_lenient(deserializer)?.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "f64_lenient")]
        amount: f64,
        #[serde(deserialize_with = "i64_lenient")]
        count: i64,
        #[serde(default, deserialize_with = "opt_f64_lenient")]
        maybe: Option<f64>,
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let s: Sample = serde_json::from_value(json!({"amount": "320.50", "count": 12})).unwrap();
        assert_eq!(s.amount, 320.5);
        assert_eq!(s.count, 12);
        assert_eq!(s.maybe, None);

        let s: Sample =
            serde_json::from_value(json!({"amount": 7, "count": "8", "maybe": null})).unwrap();
        assert_eq!(s.amount, 7.0);
        assert_eq!(s.count, 8);
        assert_eq!(s.maybe, None);
    }

    #[test]
    fn rejects_counts_out_of_range() {
        let err = serde_json::from_value::<Sample>(json!({"amount": 1, "count": "1e30"}));
        assert!(err.is_err());
        let err = serde_json::from_value::<Sample>(json!({"amount": 1, "count": -1e30}));
        assert!(err.is_err());
        let err = serde_json::from_value::<Sample>(json!({"amount": 1, "count": "2.5"}));
        assert!(err.is_err());

        let s: Sample =
            serde_json::from_value(json!({"amount": 1, "count": "9223372036854775807"})).unwrap();
        assert_eq!(s.count, i64::MAX);
        let s: Sample = serde_json::from_value(json!({"amount": 1, "count": "3e3"})).unwrap();
        assert_eq!(s.count, 3000);
    }

    #[test]
    fn rejects_non_numeric_text() {
        let err = serde_json::from_value::<Sample>(json!({"amount": "lots", "count": 1}));
        assert!(err.is_err());

        let err = serde_json::from_value::<Sample>(json!({"amount": 1, "count": 2.5}));
        assert!(err.is_err());
    }
}
