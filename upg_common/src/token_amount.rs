use std::{fmt::Display, str::FromStr};

use thiserror::Error;

use crate::{MicroUsdt, USDT_DECIMALS};

/// Larger scales would overflow `u128` arithmetic. No ERC-20 token in use comes close.
const MAX_DECIMALS: u8 = 30;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenAmountError {
    #[error("Token amount '{0}' is not a valid unsigned integer")]
    InvalidRawValue(String),
    #[error("Token amount '{0}' is not a valid decimal value")]
    InvalidDecimalValue(String),
    #[error("Unsupported number of token decimals: {0}")]
    UnsupportedDecimals(u8),
    #[error("Token amount is too large: {0}")]
    Overflow(String),
}

/// An exact on-chain token amount, in the token's base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAmount {
    raw: u128,
    decimals: u8,
}

impl TokenAmount {
    pub fn new(raw: u128, decimals: u8) -> Result<Self, TokenAmountError> {
        if decimals > MAX_DECIMALS {
            return Err(TokenAmountError::UnsupportedDecimals(decimals));
        }
        Ok(Self { raw, decimals })
    }

    /// Parses a base-unit integer string, as returned by `balanceOf`.
    pub fn from_raw_str(raw: &str, decimals: u8) -> Result<Self, TokenAmountError> {
        let value = u128::from_str(raw.trim()).map_err(|_| TokenAmountError::InvalidRawValue(raw.to_string()))?;
        Self::new(value, decimals)
    }

    /// Parses a human-readable decimal string (`"150.5"`). Digits beyond `decimals` are rejected rather than rounded.
    pub fn from_decimal_str(value: &str, decimals: u8) -> Result<Self, TokenAmountError> {
        let invalid = || TokenAmountError::InvalidDecimalValue(value.to_string());
        let trimmed = value.trim();
        let (whole, frac) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) || frac.len() > decimals as usize {
            return Err(invalid());
        }
        let scale = scale(decimals)?;
        let whole = if whole.is_empty() { 0 } else { u128::from_str(whole).map_err(|_| invalid())? };
        let frac_units = if frac.is_empty() {
            0
        } else {
            let padding = scale_for(decimals as usize - frac.len())?;
            u128::from_str(frac).map_err(|_| invalid())? * padding
        };
        let raw = whole
            .checked_mul(scale)
            .and_then(|w| w.checked_add(frac_units))
            .ok_or_else(|| TokenAmountError::Overflow(value.to_string()))?;
        Self::new(raw, decimals)
    }

    pub fn raw(&self) -> u128 {
        self.raw
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    /// The amount in micro-USDT. Precision beyond six decimal places is truncated.
    pub fn to_micro_usdt(&self) -> Result<MicroUsdt, TokenAmountError> {
        let micro = if self.decimals >= USDT_DECIMALS {
            self.raw / scale(self.decimals - USDT_DECIMALS)?
        } else {
            self.raw
                .checked_mul(scale(USDT_DECIMALS - self.decimals)?)
                .ok_or_else(|| TokenAmountError::Overflow(self.to_string()))?
        };
        MicroUsdt::try_from(micro).map_err(|e| TokenAmountError::Overflow(e.to_string()))
    }

    /// The exact amount as a decimal string, without trailing zeros.
    pub fn to_decimal_string(&self) -> String {
        // `decimals` is bounded by MAX_DECIMALS, so the scale always fits
        let scale = 10u128.pow(u32::from(self.decimals));
        let whole = self.raw / scale;
        let frac = self.raw % scale;
        if frac == 0 {
            return whole.to_string();
        }
        let frac = format!("{frac:0width$}", width = self.decimals as usize);
        format!("{whole}.{}", frac.trim_end_matches('0'))
    }
}

impl Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

fn scale(decimals: u8) -> Result<u128, TokenAmountError> {
    scale_for(decimals as usize)
}

fn scale_for(exp: usize) -> Result<u128, TokenAmountError> {
    u32::try_from(exp)
        .ok()
        .and_then(|e| 10u128.checked_pow(e))
        .ok_or(TokenAmountError::UnsupportedDecimals(u8::try_from(exp).unwrap_or(u8::MAX)))
}
