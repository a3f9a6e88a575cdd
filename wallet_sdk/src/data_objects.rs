use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// The engine wraps every successful payload in a `result` field.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EngineResponse<T> {
    pub result: T,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc20Balance {
    /// Balance in base units, as a decimal integer string.
    pub value: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub decimals: Option<u8>,
    #[serde(default)]
    pub display_value: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedTransaction {
    pub queue_id: String,
}

/// The engine's view of a queued transaction. Every field is optional, since the engine fills them in as the
/// transaction progresses.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatus {
    #[serde(default)]
    pub queue_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub onchain_status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub mined_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub from_address: Option<String>,
}

fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimals {
        Number(u8),
        Text(String),
    }
    match Option::<Decimals>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Decimals::Number(n)) => Ok(Some(n)),
        Some(Decimals::Text(s)) => s.trim().parse::<u8>().map(Some).map_err(serde::de::Error::custom),
    }
}
