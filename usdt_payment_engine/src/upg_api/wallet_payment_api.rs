use std::fmt::Debug;

use log::*;
use upg_common::{helpers::non_empty, Chain, EvmAddress};

use super::{
    errors::WalletPaymentError,
    payment_objects::{ConfirmRequest, ListPaymentsRequest, PrepareRequest},
};
use crate::{
    db_types::{MemberSnapshot, NewWalletPayment, WalletPayment, WalletPaymentStatus},
    helpers::{clamp_limit, is_valid_transaction_hash},
    traits::{PaymentQueryFilter, StoreDirectory, WalletPaymentManagement},
};

/// `WalletPaymentApi` records USDT payments that members make to a store's payment wallet.
///
/// The member's wallet signs and broadcasts the transfer itself. The gateway only records the intent (`prepare`) and,
/// once the client reports the transaction hash, the confirmation.
pub struct WalletPaymentApi<B> {
    db: B,
    default_chain: Chain,
}

impl<B> Debug for WalletPaymentApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WalletPaymentApi")
    }
}

impl<B> WalletPaymentApi<B> {
    pub fn new(db: B) -> Self {
        Self { db, default_chain: Chain::default() }
    }

    pub fn with_default_chain(mut self, chain: Chain) -> Self {
        self.default_chain = chain;
        self
    }
}

impl<B> WalletPaymentApi<B>
where B: StoreDirectory + WalletPaymentManagement
{
    /// Records a new payment from a store member, in the `prepared` state.
    ///
    /// The member's nickname and bank details are copied onto the payment as they are now.
    pub async fn prepare(&self, req: PrepareRequest) -> Result<WalletPayment, WalletPaymentError> {
        let store = self
            .db
            .fetch_store(&req.storecode)
            .await?
            .ok_or_else(|| WalletPaymentError::StoreNotFound(req.storecode.trim().to_string()))?;
        let to_wallet = store.payment_wallet().ok_or(WalletPaymentError::PaymentWalletNotConfigured)?;
        let wallet = EvmAddress::parse(&req.wallet_address)
            .map_err(|_| WalletPaymentError::InvalidWalletAddress(req.wallet_address.clone()))?;
        let member = self.db.fetch_member(&store.storecode, &wallet).await?.ok_or_else(|| {
            WalletPaymentError::MemberNotFound { storecode: store.storecode.clone(), wallet: wallet.to_string() }
        })?;
        if !req.amount.is_positive() {
            return Err(WalletPaymentError::InvalidAmount);
        }
        let payment = NewWalletPayment {
            storecode: store.storecode,
            chain: req.chain.unwrap_or(self.default_chain),
            from_wallet_address: wallet,
            to_wallet_address: to_wallet,
            amount: req.amount,
            member: MemberSnapshot::from(&member),
        };
        let payment = self.db.insert_prepared_payment(payment).await?;
        info!("💸️ {} prepared payment #{} of {} to store {}", member.nickname, payment.id, payment.amount, payment.storecode);
        Ok(payment)
    }

    /// Marks a prepared payment as confirmed by the given on-chain transaction.
    ///
    /// Only the paying wallet may confirm. Repeating a confirmation with the same hash returns the payment unchanged.
    pub async fn confirm(&self, req: ConfirmRequest) -> Result<WalletPayment, WalletPaymentError> {
        let payment =
            self.db.fetch_payment(req.payment_id).await?.ok_or(WalletPaymentError::PaymentNotFound(req.payment_id))?;
        if !payment.from_wallet_address.matches(&req.wallet_address) {
            warn!("💸️ {} tried to confirm payment #{}, which it did not make", req.wallet_address, payment.id);
            return Err(WalletPaymentError::NotPaymentOwner(payment.id));
        }
        let hash = req.transaction_hash.trim();
        if !is_valid_transaction_hash(hash) {
            return Err(WalletPaymentError::InvalidTransactionHash(req.transaction_hash));
        }
        if payment.status == WalletPaymentStatus::Confirmed {
            return match payment.transaction_hash.as_deref() {
                Some(existing) if existing.eq_ignore_ascii_case(hash) => {
                    debug!("💸️ Payment #{} is already confirmed", payment.id);
                    Ok(payment)
                },
                _ => Err(WalletPaymentError::AlreadyConfirmed(payment.id)),
            };
        }
        let payment = self.db.confirm_payment(payment.id, hash).await?;
        info!("💸️ Payment #{} of {} to store {} confirmed", payment.id, payment.amount, payment.storecode);
        Ok(payment)
    }

    /// The store's payments, newest first, optionally restricted to a single paying wallet.
    pub async fn list(&self, req: ListPaymentsRequest) -> Result<Vec<WalletPayment>, WalletPaymentError> {
        let filter = PaymentQueryFilter {
            storecode: req.storecode,
            wallet_address: non_empty(req.wallet_address.as_deref()).map(String::from),
            limit: clamp_limit(req.limit),
        };
        let payments = self.db.search_payments(filter).await?;
        Ok(payments)
    }
}
