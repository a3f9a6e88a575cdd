use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
    Method,
    StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use upg_common::{Chain, EvmAddress, TokenAmount};

use crate::{
    config::EngineConfig,
    data_objects::{EngineResponse, Erc20Balance, QueuedTransaction, TransactionStatus},
    helpers::{erc20_path, transaction_status_path},
    EngineApiError,
};

const BACKEND_WALLET_HEADER: &str = "x-backend-wallet-address";

#[derive(Clone)]
pub struct EngineApi {
    config: EngineConfig,
    client: Arc<Client>,
}

impl EngineApi {
    pub fn new(config: EngineConfig) -> Result<Self, EngineApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let bearer = format!("Bearer {}", config.access_token.reveal());
        let mut val = HeaderValue::from_str(&bearer).map_err(|e| EngineApiError::Initialization(e.to_string()))?;
        val.set_sensitive(true);
        headers.insert(AUTHORIZATION, val);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| EngineApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.url)
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&'static str, &str)],
        body: Option<B>,
    ) -> Result<T, EngineApiError> {
        let url = self.url(path);
        trace!("🔗️ Sending REST query: {method} {url}");
        let mut req = self.client.request(method, url);
        if !params.is_empty() {
            req = req.query(params);
        }
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| EngineApiError::RestResponseError(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            trace!("🔗️ REST query successful. {status}");
            let result = response
                .json::<EngineResponse<T>>()
                .await
                .map_err(|e| EngineApiError::JsonError(e.to_string()))?;
            Ok(result.result)
        } else {
            let message = response.text().await.map_err(|e| EngineApiError::RestResponseError(e.to_string()))?;
            if status == StatusCode::NOT_FOUND {
                return Err(EngineApiError::NotFound(path.to_string()));
            }
            Err(EngineApiError::QueryError { status: status.as_u16(), message })
        }
    }

    /// Fetches the USDT balance of `wallet` on `chain`.
    pub async fn usdt_balance(&self, chain: Chain, wallet: &EvmAddress) -> Result<TokenAmount, EngineApiError> {
        let path = erc20_path(chain, "balance-of");
        debug!("🔗️ Fetching {chain} USDT balance for {wallet}");
        let balance = self
            .rest_query::<Erc20Balance, ()>(Method::GET, &path, &[("wallet_address", wallet.as_str())], &[], None)
            .await?;
        let decimals = balance.decimals.unwrap_or_else(|| chain.usdt_decimals());
        if decimals != chain.usdt_decimals() {
            warn!("🔗️ Engine reported {decimals} decimals for {chain} USDT. Expected {}", chain.usdt_decimals());
        }
        TokenAmount::from_raw_str(&balance.value, decimals)
            .map_err(|e| EngineApiError::InvalidTokenAmount(e.to_string()))
    }

    /// Queues a USDT transfer of `amount` from the server wallet `from` to `to`. The engine executes the transfer
    /// asynchronously; the returned queue id is used to follow its progress.
    pub async fn usdt_transfer(
        &self,
        chain: Chain,
        from: &EvmAddress,
        to: &EvmAddress,
        amount: &TokenAmount,
    ) -> Result<String, EngineApiError> {
        let path = erc20_path(chain, "transfer");
        let body = json!({ "toAddress": to.as_str(), "amount": amount.to_decimal_string() });
        info!("🔗️ Queueing transfer of {amount} USDT on {chain} from {from} to {to}");
        let queued = self
            .rest_query::<QueuedTransaction, _>(
                Method::POST,
                &path,
                &[],
                &[(BACKEND_WALLET_HEADER, from.as_str())],
                Some(body),
            )
            .await?;
        debug!("🔗️ Transfer queued with id {}", queued.queue_id);
        Ok(queued.queue_id)
    }

    pub async fn transaction_status(&self, queue_id: &str) -> Result<TransactionStatus, EngineApiError> {
        let path = transaction_status_path(queue_id);
        trace!("🔗️ Fetching status for {queue_id}");
        match self.rest_query::<TransactionStatus, ()>(Method::GET, &path, &[], &[], None).await {
            Err(EngineApiError::NotFound(_)) => Err(EngineApiError::NotFound(queue_id.to_string())),
            other => other,
        }
    }
}
