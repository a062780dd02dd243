#![no_std]

mod errors;
mod events;
mod storage;
mod types;

use soroban_sdk::{contract, contractimpl, token, xdr::ToXdr, Address, BytesN, Env, String, Vec};

use crate::errors::Error;
use crate::events::*;
use crate::storage::*;
use crate::types::*;

// ============================================================================
// Constants
// ============================================================================

/// Number of ledgers in a day (assuming ~5 second block time)
const DAY_IN_LEDGERS: u32 = 17280;

/// TTL extension amount for instance storage (30 days)
const INSTANCE_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

/// TTL threshold before extending (29 days)
const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - DAY_IN_LEDGERS;

/// Strkey length shared by account (`G...`) and contract (`C...`) addresses.
const STRKEY_LEN: u32 = 56;

// ============================================================================
// Contract
// ============================================================================

/// Per-seller escrow ledger.
///
/// One instance exists per (seller, marketplace) pair, created and owned by
/// the seller directory. Buyers pay for orders in the native asset or in an
/// allow-listed token; the platform commission is forwarded to the
/// beneficiary in the same invocation and the remainder accumulates in the
/// ledger until the seller withdraws it.
///
/// Orders are a write-once payment history. Balances are pooled per
/// currency and withdrawn independently of orders; withdrawn funds cannot
/// be attributed back to specific orders.
#[contract]
pub struct MarketplaceLedger;

#[contractimpl]
impl MarketplaceLedger {
    // ========================================================================
    // INITIALIZATION
    // ========================================================================

    /// Initialize the ledger with its immutable identity and the initial
    /// payment-method allow-list.
    ///
    /// `commission_rate` is a whole percentage; its bounds are the
    /// creator's responsibility and are not re-checked here. When
    /// `account_buyers_only` is set, payment entry points reject buyers
    /// that are contract addresses.
    ///
    /// # Errors
    /// * `Error::AlreadyInitialized` - If the ledger has already been initialized
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        e: &Env,
        owner: Address,
        seller_id: String,
        marketplace_id: String,
        seller: Address,
        beneficiary: Address,
        commission_rate: u32,
        native_token: Address,
        payment_methods: Vec<Address>,
        account_buyers_only: bool,
    ) -> Result<(), Error> {
        owner.require_auth();

        if is_initialized(e) {
            return Err(Error::AlreadyInitialized);
        }

        let config = LedgerConfig {
            owner,
            seller_id,
            marketplace_id,
            seller,
            beneficiary,
            commission_rate,
            native_token,
            account_buyers_only,
        };
        set_config(e, &config);

        // Seed the allow-list silently; method events only mark changes
        // made after creation.
        for method in payment_methods.iter() {
            set_payment_method(e, &method, true);
        }

        set_initialized(e);
        Self::extend_instance_ttl(e);
        Ok(())
    }

    // ========================================================================
    // PAYMENT ACCEPTANCE
    // ========================================================================

    /// Accept a native-asset payment for a new order.
    ///
    /// `amount` is the value the buyer supplies with the call and must
    /// cover `price`; anything above it is returned to the buyer within
    /// the same invocation. The commission share of `price` goes to the
    /// beneficiary immediately, the rest stays in the ledger as seller
    /// income.
    ///
    /// The order record is persisted before any transfer; a transfer
    /// failure aborts the invocation and rolls that write back.
    pub fn pay_with_coin(
        e: &Env,
        buyer: Address,
        order_id: String,
        price: i128,
        amount: i128,
    ) -> Result<(), Error> {
        buyer.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;

        if config.account_buyers_only && !is_account_address(&buyer) {
            return Err(Error::OnlyAccount);
        }
        if order_id.is_empty() {
            return Err(Error::InvalidOrderId);
        }
        if price <= 0 {
            return Err(Error::InvalidPrice);
        }
        if order_exists(e, &order_id) {
            return Err(Error::OrderAlreadyPaid);
        }
        if amount < price {
            return Err(Error::InvalidValue);
        }

        let commission = commission_for(price, config.commission_rate)?;
        let seller_income = price - commission;

        let order = Order {
            buyer: buyer.clone(),
            price,
            seller_income,
            payment_method: None,
        };
        set_order(e, &order_id, &order);

        let native = token::Client::new(e, &config.native_token);
        if native
            .try_transfer(&buyer, &e.current_contract_address(), &amount)
            .is_err()
        {
            return Err(Error::PaymentTransferFailed);
        }

        let excess = amount - price;
        if excess > 0
            && native
                .try_transfer(&e.current_contract_address(), &buyer, &excess)
                .is_err()
        {
            return Err(Error::ExcessRefundFailed);
        }

        if commission > 0
            && native
                .try_transfer(&e.current_contract_address(), &config.beneficiary, &commission)
                .is_err()
        {
            return Err(Error::CommissionForwardFailed);
        }

        let order_id_hash = hash_order_id(e, &order_id);
        OrderPaidEventData {
            buyer,
            order_id_hash,
            payment_method: None,
            order_id,
            price,
            seller_income,
        }
        .publish(e);

        Self::extend_instance_ttl(e);
        Ok(())
    }

    /// Accept a payment in an allow-listed token for a new order.
    ///
    /// A payment method that is not a contract address and one that is
    /// missing from the allow-list are the same failure from the caller's
    /// point of view. The buyer balance pre-check can go stale before the
    /// pull; the transfer itself is the authoritative failure surface.
    pub fn pay_with_token(
        e: &Env,
        buyer: Address,
        order_id: String,
        price: i128,
        payment_method: Address,
    ) -> Result<(), Error> {
        buyer.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;

        if config.account_buyers_only && !is_account_address(&buyer) {
            return Err(Error::OnlyAccount);
        }
        if order_id.is_empty() {
            return Err(Error::InvalidOrderId);
        }
        if price <= 0 {
            return Err(Error::InvalidPrice);
        }
        if !is_contract_address(&payment_method) {
            return Err(Error::InvalidContract);
        }
        if !is_payment_method_allowed(e, &payment_method) {
            return Err(Error::InvalidContract);
        }
        if order_exists(e, &order_id) {
            return Err(Error::OrderAlreadyPaid);
        }

        let client = token::Client::new(e, &payment_method);
        if client.balance(&buyer) < price {
            return Err(Error::InsufficientBalance);
        }

        let commission = commission_for(price, config.commission_rate)?;
        let seller_income = price - commission;

        let order = Order {
            buyer: buyer.clone(),
            price,
            seller_income,
            payment_method: Some(payment_method.clone()),
        };
        set_order(e, &order_id, &order);

        if client
            .try_transfer(&buyer, &e.current_contract_address(), &price)
            .is_err()
        {
            return Err(Error::PaymentTransferFailed);
        }

        if commission > 0
            && client
                .try_transfer(&e.current_contract_address(), &config.beneficiary, &commission)
                .is_err()
        {
            return Err(Error::CommissionForwardFailed);
        }

        let order_id_hash = hash_order_id(e, &order_id);
        OrderPaidEventData {
            buyer,
            order_id_hash,
            payment_method: Some(payment_method),
            order_id,
            price,
            seller_income,
        }
        .publish(e);

        Self::extend_instance_ttl(e);
        Ok(())
    }

    // ========================================================================
    // PAYMENT METHOD MANAGEMENT
    // ========================================================================

    /// Allow-list a token contract for future payments (owner only).
    ///
    /// Re-adding an already-allowed method is a silent no-op: no state
    /// change, no event.
    pub fn add_payment_method(e: &Env, caller: Address, method: Address) -> Result<(), Error> {
        caller.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;
        if caller != config.owner {
            return Err(Error::OnlyOwner);
        }
        if !is_contract_address(&method) {
            return Err(Error::NotAContract);
        }

        if !is_payment_method_allowed(e, &method) {
            set_payment_method(e, &method, true);
            PaymentMethodAddedEventData { method }.publish(e);
        }

        Self::extend_instance_ttl(e);
        Ok(())
    }

    /// Drop a token contract from the allow-list (owner only).
    ///
    /// Existing orders keep their payment-method reference; removal only
    /// affects future payments and token withdrawals. Removing an
    /// already-absent method is a silent no-op.
    pub fn remove_payment_method(e: &Env, caller: Address, method: Address) -> Result<(), Error> {
        caller.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;
        if caller != config.owner {
            return Err(Error::OnlyOwner);
        }
        if !is_contract_address(&method) {
            return Err(Error::NotAContract);
        }

        if is_payment_method_allowed(e, &method) {
            set_payment_method(e, &method, false);
            PaymentMethodRemovedEventData { method }.publish(e);
        }

        Self::extend_instance_ttl(e);
        Ok(())
    }

    // ========================================================================
    // WITHDRAWAL
    // ========================================================================

    /// Withdraw the entire held native-asset balance to the seller.
    pub fn withdraw_coins(e: &Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;
        if caller != config.seller {
            return Err(Error::OnlySeller);
        }

        let balance = held_balance(e, &config.native_token);
        if balance <= 0 {
            return Err(Error::NoFundsAvailable);
        }

        pay_out_seller(e, &config.native_token, &config, balance, None)?;
        Self::extend_instance_ttl(e);
        Ok(())
    }

    /// Withdraw part of the held native-asset balance to the seller.
    pub fn withdraw_coins_amount(e: &Env, caller: Address, amount: i128) -> Result<(), Error> {
        caller.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;
        if caller != config.seller {
            return Err(Error::OnlySeller);
        }
        if amount <= 0 {
            return Err(Error::ZeroAmount);
        }

        let balance = held_balance(e, &config.native_token);
        if balance <= 0 {
            return Err(Error::NoFundsAvailable);
        }
        if amount > balance {
            return Err(Error::InvalidAmount);
        }

        pay_out_seller(e, &config.native_token, &config, amount, None)?;
        Self::extend_instance_ttl(e);
        Ok(())
    }

    /// Withdraw the entire held balance of an allow-listed token to the
    /// seller.
    pub fn withdraw_tokens(
        e: &Env,
        caller: Address,
        payment_method: Address,
    ) -> Result<(), Error> {
        caller.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;
        if caller != config.seller {
            return Err(Error::OnlySeller);
        }
        if !is_payment_method_allowed(e, &payment_method) {
            return Err(Error::InvalidContract);
        }

        let balance = held_balance(e, &payment_method);
        if balance <= 0 {
            return Err(Error::NoFundsAvailable);
        }

        pay_out_seller(e, &payment_method, &config, balance, Some(payment_method.clone()))?;
        Self::extend_instance_ttl(e);
        Ok(())
    }

    /// Withdraw part of the held balance of an allow-listed token to the
    /// seller.
    pub fn withdraw_tokens_amount(
        e: &Env,
        caller: Address,
        payment_method: Address,
        amount: i128,
    ) -> Result<(), Error> {
        caller.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;
        if caller != config.seller {
            return Err(Error::OnlySeller);
        }
        if !is_payment_method_allowed(e, &payment_method) {
            return Err(Error::InvalidContract);
        }
        if amount <= 0 {
            return Err(Error::ZeroAmount);
        }

        let balance = held_balance(e, &payment_method);
        if balance <= 0 {
            return Err(Error::NoFundsAvailable);
        }
        if amount > balance {
            return Err(Error::InvalidAmount);
        }

        pay_out_seller(e, &payment_method, &config, amount, Some(payment_method.clone()))?;
        Self::extend_instance_ttl(e);
        Ok(())
    }

    // ========================================================================
    // QUERY
    // ========================================================================

    /// Look up an order. A missing id returns `exists == false` with empty
    /// fields; this call never fails.
    pub fn get_order(e: &Env, order_id: String) -> OrderInfo {
        match get_order(e, &order_id) {
            Some(order) => OrderInfo {
                exists: true,
                buyer: Some(order.buyer),
                price: order.price,
                seller_income: order.seller_income,
                payment_method: order.payment_method,
            },
            None => OrderInfo {
                exists: false,
                buyer: None,
                price: 0,
                seller_income: 0,
                payment_method: None,
            },
        }
    }

    /// Whether a token contract is currently accepted as payment.
    pub fn is_payment_method_allowed(e: &Env, method: Address) -> bool {
        is_payment_method_allowed(e, &method)
    }

    /// Get ledger configuration
    pub fn get_config(e: &Env) -> Result<LedgerConfig, Error> {
        get_config(e).ok_or(Error::NotInitialized)
    }

    // ========================================================================
    // INTERNAL HELPERS
    // ========================================================================

    /// Extend the TTL of instance storage.
    /// Called internally during state-changing operations.
    fn extend_instance_ttl(e: &Env) {
        e.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
    }
}

// ============================================================================
// Free helpers
// ============================================================================

/// Commission uses integer floor division; sub-unit remainders stay with
/// the seller (price 1 at rate 2 yields a commission of 0).
fn commission_for(price: i128, rate: u32) -> Result<i128, Error> {
    price
        .checked_mul(rate as i128)
        .ok_or(Error::CommissionOverflow)?
        .checked_div(100)
        .ok_or(Error::CommissionOverflow)
}

fn hash_order_id(e: &Env, order_id: &String) -> BytesN<32> {
    e.crypto().sha256(&order_id.clone().to_xdr(e)).to_bytes()
}

/// Balance of this ledger in the given token.
fn held_balance(e: &Env, token_address: &Address) -> i128 {
    token::Client::new(e, token_address).balance(&e.current_contract_address())
}

fn pay_out_seller(
    e: &Env,
    token_address: &Address,
    config: &LedgerConfig,
    amount: i128,
    payment_method: Option<Address>,
) -> Result<(), Error> {
    let client = token::Client::new(e, token_address);
    if client
        .try_transfer(&e.current_contract_address(), &config.seller, &amount)
        .is_err()
    {
        return Err(Error::WithdrawalFailed);
    }

    WithdrawalEventData {
        seller: config.seller.clone(),
        payment_method,
        amount,
    }
    .publish(e);
    Ok(())
}

/// Reads the strkey discriminant: account addresses render as `G...`,
/// contract addresses as `C...`, both 56 characters.
fn strkey_first_byte(address: &Address) -> Option<u8> {
    let s = address.to_string();
    if s.len() != STRKEY_LEN {
        return None;
    }
    let mut buf = [0u8; STRKEY_LEN as usize];
    s.copy_into_slice(&mut buf);
    Some(buf[0])
}

fn is_account_address(address: &Address) -> bool {
    strkey_first_byte(address) == Some(b'G')
}

fn is_contract_address(address: &Address) -> bool {
    strkey_first_byte(address) == Some(b'C')
}
