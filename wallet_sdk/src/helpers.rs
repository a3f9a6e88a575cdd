use upg_common::Chain;

/// The path prefix for ERC-20 calls against the USDT contract on `chain`.
pub fn erc20_path(chain: Chain, action: &str) -> String {
    format!("/contract/{}/{}/erc20/{action}", chain.chain_id(), chain.usdt_contract())
}

/// The queue id is percent-encoded so it always stays a single path segment.
pub fn transaction_status_path(queue_id: &str) -> String {
    format!("/transaction/status/{}", urlencoding::encode(queue_id))
}
