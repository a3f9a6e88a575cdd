use serde::{Deserialize, Serialize};
use usdt_payment_engine::upg_api::{
    collection_objects::{CollectBalanceRequest, CollectRequest, CollectStatusRequest, LedgerQuery},
    dashboard_api::StoreDashboardRequest,
    payment_objects::{ConfirmRequest, ListPaymentsRequest, PrepareRequest},
};

/// The body of a `POST /api/wallet/usdt` call. The `action` field selects the operation, and the remaining fields are
/// that operation's parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum WalletUsdtRequest {
    CollectBalance(CollectBalanceRequest),
    Collect(CollectRequest),
    CollectStatus(CollectStatusRequest),
    CollectHistory(LedgerQuery),
    CollectQueue(LedgerQuery),
    Prepare(PrepareRequest),
    Confirm(ConfirmRequest),
    List(ListPaymentsRequest),
    StoreDashboard(StoreDashboardRequest),
}

impl WalletUsdtRequest {
    pub fn action(&self) -> &'static str {
        match self {
            Self::CollectBalance(_) => "collect-balance",
            Self::Collect(_) => "collect",
            Self::CollectStatus(_) => "collect-status",
            Self::CollectHistory(_) => "collect-history",
            Self::CollectQueue(_) => "collect-queue",
            Self::Prepare(_) => "prepare",
            Self::Confirm(_) => "confirm",
            Self::List(_) => "list",
            Self::StoreDashboard(_) => "store-dashboard",
        }
    }

    pub fn storecode(&self) -> Option<&str> {
        match self {
            Self::CollectBalance(r) => Some(&r.storecode),
            Self::Collect(r) => Some(&r.storecode),
            Self::CollectStatus(r) => Some(&r.storecode),
            Self::CollectHistory(q) | Self::CollectQueue(q) => Some(&q.storecode),
            Self::Prepare(r) => Some(&r.storecode),
            Self::Confirm(_) => None,
            Self::List(r) => Some(&r.storecode),
            Self::StoreDashboard(r) => Some(&r.storecode),
        }
    }
}

/// Successful responses are wrapped as `{"result": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResult<T> {
    pub result: T,
}

impl<T> JsonResult<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}
