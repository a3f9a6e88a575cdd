//! Dispatch for the `/api/wallet/usdt` endpoint.
//!
//! The request body has already been parsed into a [`WalletUsdtRequest`] by the time it gets here, so every branch
//! is a straight call into one of the gateway APIs. Errors from the APIs are converted into [`ServerError`]s, which
//! take care of the status code.
use actix_web::HttpResponse;
use log::*;
use serde::Serialize;
use usdt_payment_engine::{
    CollectionApi,
    ExecutionService,
    StoreDashboardApi,
    UsdtGatewayDatabase,
    WalletPaymentApi,
};

use crate::{
    data_objects::{JsonResult, WalletUsdtRequest},
    errors::ServerError,
};

/// The APIs that the wallet endpoint can call into.
pub struct WalletUsdtApis<'a, B, E> {
    pub collections: &'a CollectionApi<B, E>,
    pub payments: &'a WalletPaymentApi<B>,
    pub dashboards: &'a StoreDashboardApi<B, E>,
}

pub async fn handle_wallet_usdt<B, E>(
    apis: WalletUsdtApis<'_, B, E>,
    request: WalletUsdtRequest,
) -> Result<HttpResponse, ServerError>
where
    B: UsdtGatewayDatabase,
    E: ExecutionService,
{
    let action = request.action();
    trace!("💻️ Dispatching {action} for {}", request.storecode().unwrap_or("(no store)"));
    match request {
        WalletUsdtRequest::CollectBalance(req) => ok(apis.collections.collect_balance_preview(req).await?),
        WalletUsdtRequest::Collect(req) => {
            let attempt = apis.collections.collect(req).await?;
            info!("💻️ Collection {} from {} is {}", attempt.transaction_id, attempt.storecode, attempt.status);
            ok(attempt)
        },
        WalletUsdtRequest::CollectStatus(req) => ok(apis.collections.collect_status(req).await?),
        WalletUsdtRequest::CollectHistory(query) => ok(apis.collections.history(query).await?),
        WalletUsdtRequest::CollectQueue(query) => ok(apis.collections.queue(query).await?),
        WalletUsdtRequest::Prepare(req) => ok(apis.payments.prepare(req).await?),
        WalletUsdtRequest::Confirm(req) => ok(apis.payments.confirm(req).await?),
        WalletUsdtRequest::List(req) => ok(apis.payments.list(req).await?),
        WalletUsdtRequest::StoreDashboard(req) => ok(apis.dashboards.dashboard(req).await?),
    }
}

fn ok<T: Serialize>(result: T) -> Result<HttpResponse, ServerError> {
    Ok(HttpResponse::Ok().json(JsonResult::new(result)))
}
