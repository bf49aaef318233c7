//! Identity types for vault entities
//!
//! A 20-byte `Address` identifies every party the custody layer deals with:
//! depositors, recipients, vault and registry instances, operators, and the
//! signing authority. A `NetworkId` pins state to one execution environment.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::AddressParseError;

/// A 20-byte identity value.
///
/// Displayed and parsed as `0x`-prefixed hex. The all-zero address is the
/// null identity; setup operations reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// Byte width of an address.
    pub const LEN: usize = 20;

    /// The all-zero (null) address.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create from a fixed byte array.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Create from a byte slice, checking length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressParseError> {
        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|_| AddressParseError::InvalidLength(bytes.len()))?;
        Ok(Self(arr))
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Whether this is the all-zero (null) address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)
            .map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Identifier of the execution environment a vault is deployed to.
///
/// Withdrawal authorizations hash the network id into their digest, so a
/// signature issued for one environment can never be replayed on another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkId(u64);

impl NetworkId {
    /// Create a new network id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NetworkId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
