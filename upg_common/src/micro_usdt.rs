use std::fmt::Display;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sqlx::Type;
use thiserror::Error;

pub const USDT_CURRENCY_CODE: &str = "USDT";
/// The number of decimal places that amounts are tracked with inside the gateway.
pub const USDT_DECIMALS: u8 = 6;
const MICRO_PER_USDT: f64 = 1_000_000.0;

//--------------------------------------     MicroUsdt       ---------------------------------------------------------
/// An amount of USDT, held as an integer number of micro-USDT.
///
/// Over JSON, amounts travel as decimal numbers of whole USDT (`150.5`), which is what the web clients send and
/// expect.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, PartialEq, Eq, Hash)]
#[sqlx(transparent)]
pub struct MicroUsdt(i64);

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in micro-USDT: {0}")]
pub struct MicroUsdtConversionError(String);

impl From<i64> for MicroUsdt {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl TryFrom<u128> for MicroUsdt {
    type Error = MicroUsdtConversionError;

    fn try_from(value: u128) -> Result<Self, Self::Error> {
        i64::try_from(value)
            .map(Self)
            .map_err(|_| MicroUsdtConversionError(format!("{value} is too large to convert to MicroUsdt")))
    }
}

impl Display for MicroUsdt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:0.6} {USDT_CURRENCY_CODE}", self.as_usdt())
    }
}

impl MicroUsdt {
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Converts a decimal USDT value into micro-USDT, rounding to the nearest micro unit.
    pub fn try_from_usdt(usdt: f64) -> Result<Self, MicroUsdtConversionError> {
        if !usdt.is_finite() {
            return Err(MicroUsdtConversionError(format!("{usdt} is not a finite number")));
        }
        let micro = (usdt * MICRO_PER_USDT).round();
        if micro.abs() >= i64::MAX as f64 {
            return Err(MicroUsdtConversionError(format!("{usdt} is out of range")));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(micro as i64))
    }

    pub fn as_usdt(&self) -> f64 {
        self.0 as f64 / MICRO_PER_USDT
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl Serialize for MicroUsdt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_usdt())
    }
}

impl<'de> Deserialize<'de> for MicroUsdt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let usdt = f64::deserialize(deserializer)?;
        Self::try_from_usdt(usdt).map_err(de::Error::custom)
    }
}
