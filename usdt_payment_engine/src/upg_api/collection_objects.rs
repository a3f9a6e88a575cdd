use serde::{Deserialize, Serialize};
use upg_common::{Chain, EvmAddress, MicroUsdt};

use crate::db_types::CollectionRole;

/// A read-only check of what a collection would do right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectBalanceRequest {
    pub storecode: String,
    #[serde(default)]
    pub chain: Option<Chain>,
    pub requested_by_wallet_address: String,
    #[serde(default)]
    pub agentcode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectRequest {
    pub storecode: String,
    #[serde(default)]
    pub chain: Option<Chain>,
    pub requested_by_wallet_address: String,
    /// Must be the wallet the caller is authorized to collect to.
    pub to_wallet_address: String,
    #[serde(default)]
    pub agentcode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectStatusRequest {
    pub storecode: String,
    #[serde(default)]
    pub agentcode: Option<String>,
    pub requested_by_wallet_address: String,
    pub transaction_id: String,
    /// Only used if the transaction has no ledger entry yet.
    #[serde(default)]
    pub chain: Option<Chain>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerQuery {
    pub storecode: String,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectBalancePreview {
    pub storecode: String,
    pub chain: Chain,
    pub role: CollectionRole,
    pub authorized_wallet_address: EvmAddress,
    pub payment_wallet_address: EvmAddress,
    pub balance: MicroUsdt,
}
