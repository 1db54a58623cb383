//! Account identifiers.
//!
//! An `Address` names any party the ledger deals with: plain accounts, the
//! ledger itself, the collaborating contracts. The all-zero address doubles as
//! the "absent" marker returned by custody lookups.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const ADDRESS_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LEN]);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseAddressError {
    #[error("address must start with 0x")]
    MissingPrefix,

    #[error("address must have {expected} hex digits, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
}

impl Address {
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Builds an address whose trailing eight bytes hold `value` (big endian).
    /// Handy for deterministic fixtures: `from_low_u64(1)` is `0x00..01`.
    pub fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[ADDRESS_LEN - 8..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(ParseAddressError::MissingPrefix)?;

        let invalid_length = ParseAddressError::InvalidLength {
            expected: ADDRESS_LEN * 2,
            got: digits.len(),
        };
        let decoded = hex::decode(digits).map_err(|e| match e {
            hex::FromHexError::InvalidHexCharacter { c, .. } => ParseAddressError::InvalidDigit(c),
            _ => invalid_length.clone(),
        })?;

        let bytes: [u8; ADDRESS_LEN] = decoded.try_into().map_err(|_| invalid_length)?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
