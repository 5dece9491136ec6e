//! 12-byte document identifier
//!
//! The document store keys records by a 12-byte id rendered as 24 lowercase
//! hex characters. The search index stores that rendering as the hit `_id`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of bytes in an ObjectId
pub const OBJECT_ID_LEN: usize = 12;

/// Error returned when parsing an ObjectId from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectIdError {
    /// Wrong number of characters
    #[error("expected {expected} hex characters, got {actual}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Length found
        actual: usize,
    },
    /// Non-hex character
    #[error("invalid hex character {ch:?} at position {position}")]
    InvalidCharacter {
        /// Offending character
        ch: char,
        /// Character index
        position: usize,
    },
}

/// Store identifier for a document record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_LEN]);

impl ObjectId {
    /// Create an ObjectId from raw bytes
    pub fn from_bytes(bytes: [u8; OBJECT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; OBJECT_ID_LEN] {
        &self.0
    }

    /// Lowercase hex rendering
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

fn hex_value(ch: char, position: usize) -> Result<u8, ObjectIdError> {
    ch.to_digit(16)
        .map(|d| d as u8)
        .ok_or(ObjectIdError::InvalidCharacter { ch, position })
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != OBJECT_ID_LEN * 2 {
            return Err(ObjectIdError::InvalidLength {
                expected: OBJECT_ID_LEN * 2,
                actual: chars.len(),
            });
        }

        let mut bytes = [0u8; OBJECT_ID_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let hi = hex_value(chars[2 * i], 2 * i)?;
            let lo = hex_value(chars[2 * i + 1], 2 * i + 1)?;
            *byte = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::StoreId;

    const HEX: &str = "5f3c9a1b2e4d6f8a0b1c2d3e";

    #[test]
    fn test_parse_and_display_roundtrip() {
        let id: ObjectId = HEX.parse().unwrap();
        assert_eq!(id.to_string(), HEX);
        assert_eq!(id.as_bytes()[0], 0x5f);
        assert_eq!(id.as_bytes()[11], 0x3e);
    }

    #[test]
    fn test_uppercase_accepted_lowercase_rendered() {
        let id: ObjectId = HEX.to_uppercase().parse().unwrap();
        assert_eq!(id.to_hex(), HEX);
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(
            "abc".parse::<ObjectId>().unwrap_err(),
            ObjectIdError::InvalidLength {
                expected: 24,
                actual: 3
            }
        );
    }

    #[test]
    fn test_non_hex() {
        let err = "5f3c9a1b2e4d6f8a0b1c2d3z".parse::<ObjectId>().unwrap_err();
        assert_eq!(
            err,
            ObjectIdError::InvalidCharacter {
                ch: 'z',
                position: 23
            }
        );
    }

    #[test]
    fn test_store_id_conversion_reports_invalid_identifier() {
        let err = ObjectId::parse_id("not-an-id").unwrap_err();
        assert!(err.is_invalid_identifier());
        assert!(err.to_string().contains("not-an-id"));
    }

    #[test]
    fn test_serde_as_string() {
        let id: ObjectId = HEX.parse().unwrap();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::json!(HEX));
        let back: ObjectId = serde_json::from_value(json).unwrap();
        assert_eq!(back, id);
    }
}
