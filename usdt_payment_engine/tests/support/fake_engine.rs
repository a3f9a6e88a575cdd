//! A scripted stand-in for the custodial execution service.
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use upg_common::{Chain, EvmAddress, TokenAmount};
use usdt_payment_engine::traits::{ExecutionService, ExecutionServiceError, ExecutionStatusReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTransfer {
    pub chain: Chain,
    pub from: EvmAddress,
    pub to: EvmAddress,
    pub amount: TokenAmount,
    pub transaction_id: String,
}

#[derive(Debug, Default)]
struct FakeState {
    balances: HashMap<String, TokenAmount>,
    statuses: HashMap<String, ExecutionStatusReport>,
    next_ids: Vec<String>,
    transfers: Vec<RecordedTransfer>,
    status_queries: Vec<String>,
    status_unavailable: bool,
}

/// Clones share state, so a test can keep a handle after passing one to an API.
#[derive(Debug, Clone, Default)]
pub struct FakeExecutionService {
    state: Arc<Mutex<FakeState>>,
}

impl FakeExecutionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the balance in whole USDT, using the chain's token decimals.
    pub fn set_balance(&self, wallet: &str, usdt: &str, chain: Chain) {
        let amount = TokenAmount::from_decimal_str(usdt, chain.usdt_decimals()).expect("Invalid test balance");
        self.state.lock().unwrap().balances.insert(wallet.to_lowercase(), amount);
    }

    /// The next transfer will be given this transaction id.
    pub fn queue_transaction_id(&self, id: &str) {
        self.state.lock().unwrap().next_ids.push(id.to_string());
    }

    pub fn set_status(&self, transaction_id: &str, report: ExecutionStatusReport) {
        self.state.lock().unwrap().statuses.insert(transaction_id.to_string(), report);
    }

    /// Status queries fail with a transport error until reset.
    pub fn set_status_unavailable(&self, unavailable: bool) {
        self.state.lock().unwrap().status_unavailable = unavailable;
    }

    pub fn transfers(&self) -> Vec<RecordedTransfer> {
        self.state.lock().unwrap().transfers.clone()
    }

    /// Every transaction id the status endpoint was asked about, in order.
    pub fn status_queries(&self) -> Vec<String> {
        self.state.lock().unwrap().status_queries.clone()
    }
}

pub fn report(status: &str) -> ExecutionStatusReport {
    ExecutionStatusReport { status: Some(status.to_string()), ..Default::default() }
}

impl ExecutionService for FakeExecutionService {
    async fn usdt_balance(&self, chain: Chain, wallet: &EvmAddress) -> Result<TokenAmount, ExecutionServiceError> {
        let state = self.state.lock().unwrap();
        let balance = state.balances.get(&wallet.as_str().to_lowercase()).copied();
        Ok(balance.unwrap_or_else(|| TokenAmount::new(0, chain.usdt_decimals()).unwrap()))
    }

    async fn enqueue_usdt_transfer(
        &self,
        chain: Chain,
        from: &EvmAddress,
        to: &EvmAddress,
        amount: &TokenAmount,
    ) -> Result<String, ExecutionServiceError> {
        let mut state = self.state.lock().unwrap();
        let transaction_id = if state.next_ids.is_empty() {
            format!("tx-{}", state.transfers.len() + 1)
        } else {
            state.next_ids.remove(0)
        };
        state.transfers.push(RecordedTransfer {
            chain,
            from: from.clone(),
            to: to.clone(),
            amount: *amount,
            transaction_id: transaction_id.clone(),
        });
        Ok(transaction_id)
    }

    async fn transaction_status(&self, transaction_id: &str) -> Result<ExecutionStatusReport, ExecutionServiceError> {
        let mut state = self.state.lock().unwrap();
        state.status_queries.push(transaction_id.to_string());
        if state.status_unavailable {
            return Err(ExecutionServiceError::Unavailable("connection refused".into()));
        }
        state.statuses.get(transaction_id).cloned().ok_or_else(|| ExecutionServiceError::NotFound(transaction_id.into()))
    }
}
