use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{0}' is not a valid wallet address")]
pub struct AddressError(pub String);

/// Returns true if `address` is `0x` followed by exactly 40 hexadecimal digits. Checksums are not verified.
pub fn is_valid_address(address: &str) -> bool {
    let address = address.trim();
    match address.strip_prefix("0x").or_else(|| address.strip_prefix("0X")) {
        Some(hex) => hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// A syntactically valid EVM wallet address.
///
/// The address keeps the letter case it was created with, so that stored values round-trip unchanged, but equality
/// is case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize, Type)]
#[serde(try_from = "String", into = "String")]
#[sqlx(transparent)]
pub struct EvmAddress(String);

impl EvmAddress {
    pub fn parse(address: &str) -> Result<Self, AddressError> {
        if is_valid_address(address) {
            Ok(Self(address.trim().to_string()))
        } else {
            Err(AddressError(address.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against an unvalidated address string.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl PartialEq for EvmAddress {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for EvmAddress {}

impl FromStr for EvmAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EvmAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EvmAddress> for String {
    fn from(value: EvmAddress) -> Self {
        value.0
    }
}

impl Display for EvmAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
