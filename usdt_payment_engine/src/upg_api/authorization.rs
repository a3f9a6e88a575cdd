//! Decides whether a wallet may sweep a store's payment wallet, and where the funds must go.
//!
//! Two kinds of wallet may collect:
//! * the store's own admin wallet (`store-admin`), in which case funds go to that wallet, and
//! * the admin wallet of the agent that owns the store (`agent-admin`), in which case funds go to the agent's wallet.
//!
//! The store-admin check runs first. All wallet comparisons ignore letter case; checksums are not verified.
use log::*;
use serde::{Deserialize, Serialize};
use upg_common::{helpers::non_empty, EvmAddress};

use crate::{
    db_types::{CollectionRole, Store},
    traits::{DirectoryError, StoreDirectory},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionAuthorization {
    pub role: CollectionRole,
    /// The only wallet the store's balance may be sent to.
    pub authorized_wallet_address: EvmAddress,
    /// The agent that owns the store, if any.
    pub agentcode: Option<String>,
    pub requested_by_wallet_address: EvmAddress,
}

/// Resolves the caller's collection rights for `store`.
///
/// Returns `None` when the caller wallet is malformed, matches neither admin wallet, or when `agentcode` is supplied and
/// does not name the store's agent. A supplied agentcode for a store without one is treated as a mismatch. Empty
/// agentcodes count as not supplied.
pub async fn resolve_collection_authorization<D: StoreDirectory>(
    directory: &D,
    store: &Store,
    agentcode: Option<&str>,
    requested_by: &str,
) -> Result<Option<CollectionAuthorization>, DirectoryError> {
    let caller = match EvmAddress::parse(requested_by) {
        Ok(a) => a,
        Err(e) => {
            debug!("🔐️ Collection request for {} rejected. {e}", store.storecode);
            return Ok(None);
        },
    };
    let store_agent = non_empty(store.agentcode.as_deref());
    match (non_empty(agentcode), store_agent) {
        (Some(requested), Some(owner)) if !requested.eq_ignore_ascii_case(owner) => {
            debug!("🔐️ Agent {requested} does not own store {}", store.storecode);
            return Ok(None);
        },
        (Some(requested), None) => {
            debug!("🔐️ Store {} has no agent, but agent {requested} was supplied", store.storecode);
            return Ok(None);
        },
        _ => {},
    }
    if let Some(admin) = store.admin_wallet().filter(|w| *w == caller) {
        trace!("🔐️ {caller} is the admin of store {}", store.storecode);
        return Ok(Some(CollectionAuthorization {
            role: CollectionRole::StoreAdmin,
            authorized_wallet_address: admin,
            agentcode: store_agent.map(String::from),
            requested_by_wallet_address: caller,
        }));
    }
    let Some(owner) = store_agent else {
        return Ok(None);
    };
    let authorization = directory.fetch_agent(owner).await?.and_then(|agent| {
        let admin = agent.admin_wallet().filter(|w| *w == caller)?;
        trace!("🔐️ {caller} is the admin of agent {}, which owns store {}", agent.agentcode, store.storecode);
        Some(CollectionAuthorization {
            role: CollectionRole::AgentAdmin,
            authorized_wallet_address: admin,
            agentcode: Some(agent.agentcode),
            requested_by_wallet_address: caller.clone(),
        })
    });
    if authorization.is_none() {
        debug!("🔐️ {caller} is not an admin of store {} or its agent", store.storecode);
    }
    Ok(authorization)
}
