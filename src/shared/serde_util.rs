//! Custom serde helpers for Deribit wire formats.

/// Deserializes a Unix-millis `u64` into `DateTime<Utc>`.
///
/// Deribit reports `timestamp`, `creation_timestamp` and friends as epoch
/// milliseconds.
pub mod timestamp_ms {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        DateTime::<Utc>::from_timestamp_millis(millis as i64)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", millis)))
    }
}

/// Numeric price, or `None` for the `"market_price"` placeholder and nulls.
pub mod price_or_none {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            _ => None,
        })
    }
}
