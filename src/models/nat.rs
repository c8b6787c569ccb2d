//! Wide unsigned integer used for every numeric field on the gateway wire.
//!
//! The gateway models counts, prices and identifiers as unbounded naturals.
//! `Nat` carries them as `u128` and always serializes as a decimal string so
//! no JSON consumer truncates large values.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Non-negative integer exchanged with the gateway
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nat(u128);

/// Errors raised when text cannot be read as a [`Nat`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseNatError {
    #[error("value is empty")]
    Empty,

    #[error("'{0}' is not a non-negative integer")]
    Invalid(String),
}

impl Nat {
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u128 {
        self.0
    }

    /// Parse trimmed decimal text
    pub fn parse(text: &str) -> Result<Self, ParseNatError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ParseNatError::Empty);
        }
        trimmed
            .parse::<u128>()
            .map(Self)
            .map_err(|_| ParseNatError::Invalid(trimmed.to_string()))
    }
}

impl From<u32> for Nat {
    fn from(value: u32) -> Self {
        Self(u128::from(value))
    }
}

impl From<u64> for Nat {
    fn from(value: u64) -> Self {
        Self(u128::from(value))
    }
}

impl fmt::Display for Nat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Nat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

struct NatVisitor;

impl<'de> Visitor<'de> for NatVisitor {
    type Value = Nat;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or its decimal string")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Nat, E> {
        Ok(Nat::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Nat, E> {
        u64::try_from(value)
            .map(Nat::from)
            .map_err(|_| E::custom(format!("negative value {} for a natural", value)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Nat, E> {
        Nat::parse(value).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Nat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NatVisitor)
    }
}
