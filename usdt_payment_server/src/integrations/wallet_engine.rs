use log::*;
use upg_common::{Chain, EvmAddress, TokenAmount};
use usdt_payment_engine::{
    traits::{ExecutionServiceError, ExecutionStatusReport},
    ExecutionService,
};
use wallet_sdk::{EngineApi, EngineApiError, TransactionStatus};

/// Adapts the engine REST client to the [`ExecutionService`] contract the gateway APIs are written against.
#[derive(Clone)]
pub struct EngineExecutionService(EngineApi);

impl EngineExecutionService {
    pub fn new(api: EngineApi) -> Self {
        Self(api)
    }
}

impl ExecutionService for EngineExecutionService {
    async fn usdt_balance(&self, chain: Chain, wallet: &EvmAddress) -> Result<TokenAmount, ExecutionServiceError> {
        self.0.usdt_balance(chain, wallet).await.map_err(to_execution_error)
    }

    async fn enqueue_usdt_transfer(
        &self,
        chain: Chain,
        from: &EvmAddress,
        to: &EvmAddress,
        amount: &TokenAmount,
    ) -> Result<String, ExecutionServiceError> {
        self.0.usdt_transfer(chain, from, to, amount).await.map_err(to_execution_error)
    }

    async fn transaction_status(&self, transaction_id: &str) -> Result<ExecutionStatusReport, ExecutionServiceError> {
        self.0.transaction_status(transaction_id).await.map(to_status_report).map_err(to_execution_error)
    }
}

fn to_execution_error(e: EngineApiError) -> ExecutionServiceError {
    match e {
        EngineApiError::NotFound(id) => ExecutionServiceError::NotFound(id),
        EngineApiError::QueryError { status, message } if (400..500).contains(&status) => {
            warn!("🔗️ The engine refused a request ({status}). {message}");
            ExecutionServiceError::Rejected(message)
        },
        e => {
            error!("🔗️ Could not talk to the engine. {e}");
            ExecutionServiceError::Unavailable(e.to_string())
        },
    }
}

fn to_status_report(status: TransactionStatus) -> ExecutionStatusReport {
    ExecutionStatusReport {
        status: status.status,
        transaction_hash: status.transaction_hash,
        onchain_status: status.onchain_status,
        error: status.error_message,
        confirmed_at: status.mined_at,
        from: status.from_address,
    }
}
