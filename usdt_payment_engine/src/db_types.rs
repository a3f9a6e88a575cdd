use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;
use upg_common::{Chain, EvmAddress, MicroUsdt};

#[derive(Debug, Clone, Error)]
#[error("Invalid value for {kind}: {value}")]
pub struct ConversionError {
    kind: &'static str,
    value: String,
}

//--------------------------------------        Store          ---------------------------------------------------------
/// A merchant storefront. Store records are maintained by the store management UI; the gateway only reads them.
///
/// Wallet addresses are stored exactly as they were entered, and so may be missing or malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub storecode: String,
    pub store_name: String,
    pub store_logo: Option<String>,
    pub payment_wallet_address: Option<String>,
    pub admin_wallet_address: Option<String>,
    pub agentcode: Option<String>,
}

impl Store {
    pub fn new<S: Into<String>>(storecode: S, store_name: S) -> Self {
        Self { storecode: storecode.into(), store_name: store_name.into(), ..Default::default() }
    }

    pub fn with_payment_wallet<S: Into<String>>(mut self, address: S) -> Self {
        self.payment_wallet_address = Some(address.into());
        self
    }

    pub fn with_admin_wallet<S: Into<String>>(mut self, address: S) -> Self {
        self.admin_wallet_address = Some(address.into());
        self
    }

    pub fn with_agentcode<S: Into<String>>(mut self, agentcode: S) -> Self {
        self.agentcode = Some(agentcode.into());
        self
    }

    /// The store's payment wallet, if one is configured and well-formed.
    pub fn payment_wallet(&self) -> Option<EvmAddress> {
        self.payment_wallet_address.as_deref().and_then(|a| EvmAddress::parse(a).ok())
    }

    pub fn admin_wallet(&self) -> Option<EvmAddress> {
        self.admin_wallet_address.as_deref().and_then(|a| EvmAddress::parse(a).ok())
    }
}

//--------------------------------------        Agent          ---------------------------------------------------------
/// An intermediary that owns one or more stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub agentcode: String,
    pub agent_name: String,
    pub admin_wallet_address: Option<String>,
}

impl Agent {
    pub fn new<S: Into<String>>(agentcode: S, agent_name: S) -> Self {
        Self { agentcode: agentcode.into(), agent_name: agent_name.into(), admin_wallet_address: None }
    }

    pub fn with_admin_wallet<S: Into<String>>(mut self, address: S) -> Self {
        self.admin_wallet_address = Some(address.into());
        self
    }

    pub fn admin_wallet(&self) -> Option<EvmAddress> {
        self.admin_wallet_address.as_deref().and_then(|a| EvmAddress::parse(a).ok())
    }
}

//--------------------------------------        Member         ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BankInfo {
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub account_holder: Option<String>,
}

/// A buyer registered with a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub storecode: String,
    pub wallet_address: EvmAddress,
    pub nickname: String,
    #[sqlx(flatten)]
    pub bank_info: BankInfo,
}

/// The member details copied onto a payment when it is prepared. Later edits to the member do not change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSnapshot {
    pub nickname: String,
    pub wallet_address: EvmAddress,
    pub bank_info: BankInfo,
}

impl From<&Member> for MemberSnapshot {
    fn from(member: &Member) -> Self {
        Self {
            nickname: member.nickname.clone(),
            wallet_address: member.wallet_address.clone(),
            bank_info: member.bank_info.clone(),
        }
    }
}

//--------------------------------------   CollectionRole      ---------------------------------------------------------
/// The capacity in which a wallet asked for a store's payment wallet to be swept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
pub enum CollectionRole {
    StoreAdmin,
    AgentAdmin,
}

impl Display for CollectionRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionRole::StoreAdmin => write!(f, "store-admin"),
            CollectionRole::AgentAdmin => write!(f, "agent-admin"),
        }
    }
}

//--------------------------------------  CollectionStatus     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum CollectionStatus {
    /// The execution service has accepted the request but not yet queued it.
    Requesting,
    Queued,
    /// The transaction has been broadcast, but is not mined yet.
    Submitted,
    Confirmed,
    Failed,
}

impl CollectionStatus {
    /// Confirmed and Failed collections never change status again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CollectionStatus::Confirmed | CollectionStatus::Failed)
    }
}

impl Display for CollectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionStatus::Requesting => write!(f, "REQUESTING"),
            CollectionStatus::Queued => write!(f, "QUEUED"),
            CollectionStatus::Submitted => write!(f, "SUBMITTED"),
            CollectionStatus::Confirmed => write!(f, "CONFIRMED"),
            CollectionStatus::Failed => write!(f, "FAILED"),
        }
    }
}

impl FromStr for CollectionStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REQUESTING" => Ok(Self::Requesting),
            "QUEUED" => Ok(Self::Queued),
            "SUBMITTED" => Ok(Self::Submitted),
            "CONFIRMED" => Ok(Self::Confirmed),
            "FAILED" => Ok(Self::Failed),
            s => Err(ConversionError { kind: "collection status", value: s.to_string() }),
        }
    }
}

//--------------------------------------  CollectionAttempt    ---------------------------------------------------------
/// One sweep of a store's payment wallet, keyed by the execution service's transaction id.
///
/// The same shape is used for the history ledger and for the in-flight queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CollectionAttempt {
    pub transaction_id: String,
    pub storecode: String,
    pub agentcode: Option<String>,
    pub chain: Chain,
    pub from_wallet_address: EvmAddress,
    pub to_wallet_address: EvmAddress,
    pub requested_by_wallet_address: EvmAddress,
    pub requested_by_role: CollectionRole,
    /// Unknown when the entry was first created from a status poll.
    pub requested_amount: Option<MicroUsdt>,
    pub status: CollectionStatus,
    pub onchain_status: Option<String>,
    pub transaction_hash: Option<String>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

/// The result of talking to the execution service about a collection, ready to be written to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionOutcome {
    pub transaction_id: String,
    pub storecode: String,
    pub agentcode: Option<String>,
    pub chain: Chain,
    pub from_wallet_address: EvmAddress,
    pub to_wallet_address: EvmAddress,
    pub requested_by_wallet_address: EvmAddress,
    pub requested_by_role: CollectionRole,
    pub requested_amount: Option<MicroUsdt>,
    pub status: CollectionStatus,
    pub onchain_status: Option<String>,
    pub transaction_hash: Option<String>,
    pub error: Option<String>,
    /// Only used when `status` is `Confirmed`, and only the first time.
    pub confirmed_at: Option<DateTime<Utc>>,
}

//--------------------------------------   WalletPayment       ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum WalletPaymentStatus {
    Prepared,
    Confirmed,
}

impl Display for WalletPaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletPaymentStatus::Prepared => write!(f, "prepared"),
            WalletPaymentStatus::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// A member's USDT transfer to a store's payment wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletPayment {
    pub id: i64,
    pub storecode: String,
    pub chain: Chain,
    pub from_wallet_address: EvmAddress,
    pub to_wallet_address: EvmAddress,
    pub amount: MicroUsdt,
    pub status: WalletPaymentStatus,
    pub transaction_hash: Option<String>,
    pub member: MemberSnapshot,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWalletPayment {
    pub storecode: String,
    pub chain: Chain,
    pub from_wallet_address: EvmAddress,
    pub to_wallet_address: EvmAddress,
    pub amount: MicroUsdt,
    pub member: MemberSnapshot,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTotals {
    pub prepared_count: i64,
    pub confirmed_count: i64,
    pub confirmed_amount: MicroUsdt,
}
