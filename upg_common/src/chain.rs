use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

/// The EVM networks that USDT collections and payments are supported on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Chain {
    Ethereum,
    #[default]
    Polygon,
    Arbitrum,
    Bsc,
}

#[derive(Debug, Clone, Error)]
#[error("Unsupported chain: {0}. Expected one of ethereum, polygon, arbitrum or bsc")]
pub struct ChainParseError(String);

impl Chain {
    pub const ALL: [Chain; 4] = [Chain::Ethereum, Chain::Polygon, Chain::Arbitrum, Chain::Bsc];

    pub fn name(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Polygon => "polygon",
            Chain::Arbitrum => "arbitrum",
            Chain::Bsc => "bsc",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Chain::Ethereum => 1,
            Chain::Polygon => 137,
            Chain::Arbitrum => 42161,
            Chain::Bsc => 56,
        }
    }

    /// The address of the USDT (Tether) ERC-20 contract on this chain.
    pub fn usdt_contract(&self) -> &'static str {
        match self {
            Chain::Ethereum => "0xdAC17F958D2ee523a2206206994597C13D831ec7",
            Chain::Polygon => "0xc2132D05D31c914a87C6611C10748AEb04B58e8F",
            Chain::Arbitrum => "0xFd086bC7CD5C481DCC9C85ebE478A1C0b69FCbb9",
            Chain::Bsc => "0x55d398326f99059fF775485246999027B3197955",
        }
    }

    /// Binance-peg USDT uses 18 decimals; everywhere else it is 6.
    pub fn usdt_decimals(&self) -> u8 {
        match self {
            Chain::Bsc => 18,
            _ => 6,
        }
    }
}

impl Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Chain {
    type Err = ChainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ethereum" => Ok(Self::Ethereum),
            "polygon" => Ok(Self::Polygon),
            "arbitrum" => Ok(Self::Arbitrum),
            "bsc" => Ok(Self::Bsc),
            other => Err(ChainParseError(other.to_string())),
        }
    }
}
