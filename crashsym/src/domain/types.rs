//! Newtype wrappers for values that travel through the symbolication pipeline

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A memory address from a crash report
///
/// Crash reports carry addresses as decimal JSON integers. Once a report has
/// been through the pipeline every address is written back as an uppercase
/// hexadecimal string without a `0x` prefix (`4328` becomes `"10E8"`).
/// Deserialization accepts both forms, so feeding an already-symbolicated
/// report back in leaves its address fields as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub u64);

impl Address {
    /// Canonical hexadecimal form: uppercase, minimal digits, no prefix
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("{:X}", self.0)
    }

    /// Parse the hexadecimal form produced by [`Address::to_hex`]
    ///
    /// A leading `0x`/`0X` is tolerated.
    ///
    /// # Errors
    /// Returns an error if the string is empty or contains non-hex digits
    pub fn from_hex(s: &str) -> Result<Self, std::num::ParseIntError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        u64::from_str_radix(digits, 16).map(Address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Address(value)
    }
}

impl FromStr for Address {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct AddressVisitor;

impl Visitor<'_> for AddressVisitor {
    type Value = Address;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer address or a hexadecimal address string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Address, E> {
        Ok(Address(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Address, E> {
        u64::try_from(v)
            .map(Address)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Address, E> {
        Address::from_hex(v).map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AddressVisitor)
    }
}

/// CPU architecture name as reported by the device (`arm64`, `armv7`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuArch(pub String);

impl CpuArch {
    /// Architecture value handed to the resolver
    ///
    /// Symbol bundles for 32-bit devices are built as `armv7s`, which is a
    /// superset of `armv7`, so `armv7` is passed on as `armv7s`.
    #[must_use]
    pub fn resolver_arch(&self) -> &str {
        match self.0.as_str() {
            "armv7" => "armv7s",
            other => other,
        }
    }
}

impl fmt::Display for CpuArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_hex_is_uppercase_without_prefix() {
        assert_eq!(Address(4328).to_hex(), "10E8");
        assert_eq!(Address(0).to_hex(), "0");
        assert_eq!(Address(0xdead_beef).to_string(), "DEADBEEF");
    }

    #[test]
    fn test_address_from_hex() {
        assert_eq!(Address::from_hex("10E8").unwrap(), Address(4328));
        assert_eq!(Address::from_hex("0x10e8").unwrap(), Address(4328));
        assert!(Address::from_hex("").is_err());
        assert!(Address::from_hex("xyz").is_err());
    }

    #[test]
    fn test_address_deserializes_decimal_and_hex() {
        let decimal: Address = serde_json::from_str("4328").unwrap();
        let hex: Address = serde_json::from_str("\"10E8\"").unwrap();
        assert_eq!(decimal, hex);
        assert!(serde_json::from_str::<Address>("-1").is_err());
        assert!(serde_json::from_str::<Address>("1.5").is_err());
    }

    #[test]
    fn test_address_serializes_as_hex_string() {
        let json = serde_json::to_string(&Address(572_056_299)).unwrap();
        assert_eq!(json, "\"2218E2EB\"");
    }

    #[test]
    fn test_armv7_maps_to_superset() {
        assert_eq!(CpuArch("armv7".to_string()).resolver_arch(), "armv7s");
        assert_eq!(CpuArch("arm64".to_string()).resolver_arch(), "arm64");
        assert_eq!(CpuArch("armv7s".to_string()).resolver_arch(), "armv7s");
    }
}
