//! Custom serde helpers for JSON-RPC wire formats.
//!
//! Nodes encode integers as `0x`-prefixed hex "quantities" with no leading
//! zeros (`0x0` for zero).

use super::U256;

/// Encode an integer as a hex quantity string.
pub fn to_quantity(value: U256) -> String {
    format!("0x{:x}", value)
}

/// Parse a hex quantity string.
pub fn parse_quantity(s: &str) -> Result<U256, String> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| format!("Quantity missing 0x prefix: {}", s))?;
    if digits.is_empty() {
        return Err(format!("Empty quantity: {}", s));
    }
    U256::from_str_radix(digits, 16).map_err(|e| format!("Invalid quantity {}: {:?}", s, e))
}

/// Narrow to `u64`, or `None` when the value is wider.
pub fn to_u64(value: U256) -> Option<u64> {
    (value.bits() <= 64).then(|| value.low_u64())
}

/// `u64` <-> hex quantity.
pub mod quantity_u64 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::to_quantity((*value).into()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse(s: &str) -> Result<u64, String> {
        let value = super::parse_quantity(s)?;
        super::to_u64(value).ok_or_else(|| format!("Quantity overflows u64: {}", s))
    }
}

/// `Option<u64>` <-> optional hex quantity. Use with `#[serde(default)]`.
pub mod quantity_u64_opt {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => super::quantity_u64::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        s.map(|s| super::quantity_u64::parse(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// `U256` <-> hex quantity (wei amounts).
pub mod quantity_u256 {
    use super::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::to_quantity(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_quantity(&s).map_err(serde::de::Error::custom)
    }
}

/// `U256` <-> decimal string. Accepts JSON numbers on input.
///
/// The premint API and `eth_signTypedData_v4` messages carry `uint` fields
/// this way since they exceed what JSON numbers represent exactly.
pub mod decimal_u256 {
    use super::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(u64),
    }

    pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::String(s) => U256::from_dec_str(&s)
                .map_err(|e| serde::de::Error::custom(format!("Invalid integer {}: {:?}", s, e))),
            StringOrNumber::Number(n) => Ok(U256::from(n)),
        }
    }
}

/// `u64` <-> decimal string.
pub mod decimal_u64 {
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = super::decimal_u256::deserialize(deserializer)?;
        super::to_u64(value)
            .ok_or_else(|| serde::de::Error::custom(format!("Integer overflows u64: {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_encoding() {
        assert_eq!(to_quantity(U256::zero()), "0x0");
        assert_eq!(to_quantity(U256::from(1024u64)), "0x400");
        assert_eq!(parse_quantity("0x400").unwrap(), U256::from(1024u64));
        assert!(parse_quantity("400").is_err());
        assert!(parse_quantity("0x").is_err());
    }

    #[test]
    fn test_quantity_u64_rejects_wide_values() {
        assert_eq!(quantity_u64::parse("0xffffffffffffffff").unwrap(), u64::MAX);
        assert!(quantity_u64::parse("0x10000000000000000").is_err());
    }

    #[derive(serde::Serialize, serde::Deserialize)]
    struct Supply {
        #[serde(with = "decimal_u256")]
        max: U256,
    }

    #[test]
    fn test_decimal_string_accepts_numbers() {
        let max = U256::from(u64::MAX);
        let json = serde_json::to_value(Supply { max }).unwrap();
        assert_eq!(json, serde_json::json!({ "max": "18446744073709551615" }));

        let parsed: Supply = serde_json::from_value(serde_json::json!({ "max": 42 })).unwrap();
        assert_eq!(parsed.max, U256::from(42u64));
        assert!(serde_json::from_value::<Supply>(serde_json::json!({ "max": "-1" })).is_err());
    }

    #[test]
    fn test_decimal_string_holds_full_uint256() {
        let json = serde_json::to_value(Supply { max: U256::MAX }).unwrap();
        let back: Supply = serde_json::from_value(json).unwrap();
        assert_eq!(back.max, U256::MAX);
    }
}
