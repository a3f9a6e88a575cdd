use chrono::{DateTime, Utc};
use thiserror::Error;
use upg_common::{Chain, EvmAddress, TokenAmount};

/// What the execution service reports about a queued transaction. Its status vocabulary is not ours; see
/// [`crate::helpers::normalize_status`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStatusReport {
    pub status: Option<String>,
    pub transaction_hash: Option<String>,
    pub onchain_status: Option<String>,
    pub error: Option<String>,
    pub confirmed_at: Option<DateTime<Utc>>,
    /// The wallet that is sending the transaction.
    pub from: Option<String>,
}

/// The custodial service that owns the server wallets and executes USDT transfers from them.
#[allow(async_fn_in_trait)]
pub trait ExecutionService {
    async fn usdt_balance(&self, chain: Chain, wallet: &EvmAddress) -> Result<TokenAmount, ExecutionServiceError>;

    /// Queues a transfer and returns the service's transaction id. The transfer executes asynchronously.
    async fn enqueue_usdt_transfer(
        &self,
        chain: Chain,
        from: &EvmAddress,
        to: &EvmAddress,
        amount: &TokenAmount,
    ) -> Result<String, ExecutionServiceError>;

    async fn transaction_status(&self, transaction_id: &str) -> Result<ExecutionStatusReport, ExecutionServiceError>;
}

#[derive(Debug, Clone, Error)]
pub enum ExecutionServiceError {
    #[error("The execution service has no record of {0}")]
    NotFound(String),
    #[error("The execution service rejected the request: {0}")]
    Rejected(String),
    #[error("The execution service is unavailable: {0}")]
    Unavailable(String),
}
