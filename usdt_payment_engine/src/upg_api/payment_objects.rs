use serde::{Deserialize, Serialize};
use upg_common::{Chain, MicroUsdt};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepareRequest {
    pub storecode: String,
    #[serde(default)]
    pub chain: Option<Chain>,
    /// The member's wallet, which will send the payment.
    pub wallet_address: String,
    pub amount: MicroUsdt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    pub payment_id: i64,
    pub wallet_address: String,
    pub transaction_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPaymentsRequest {
    pub storecode: String,
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}
