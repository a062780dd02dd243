#![no_std]

mod errors;
mod events;
mod storage;
mod types;

use soroban_sdk::{contract, contractimpl, Address, Env, String};

use marketplace_ledger::MarketplaceLedgerClient;
use payment_registry::PaymentMethodRegistryClient;

use crate::errors::Error;
use crate::events::*;
use crate::storage::*;
use crate::types::*;

/// Number of ledgers in a day (assuming ~5 second block time)
const DAY_IN_LEDGERS: u32 = 17280;
const INSTANCE_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - DAY_IN_LEDGERS;

/// Commission band enforced at marketplace creation; ledgers themselves
/// trust the value they are handed.
const MIN_COMMISSION_RATE: u32 = 1;
const MAX_COMMISSION_RATE: u32 = 5;

/// Seller Directory
///
/// Binds each (seller id, marketplace id) pair to exactly one marketplace
/// ledger. Creation takes ownership of a fresh, uninitialized ledger
/// instance, wires it to the platform beneficiary and native asset, and
/// seeds its payment-method allow-list with whatever the payment-method
/// registry currently enables. Later registry changes do not touch
/// existing ledgers; the directory admin adjusts those through the
/// pass-through entry points, since the directory is the owner of every
/// ledger it created.
#[contract]
pub struct SellerDirectory;

#[contractimpl]
impl SellerDirectory {
    // ========================================================================
    // INITIALIZATION
    // ========================================================================

    /// Initialize the directory.
    ///
    /// # Arguments
    /// * `admin` - Address allowed to manage ledger allow-lists
    /// * `registry` - Payment-method registry consulted at creation time
    /// * `native_token` - Stellar Asset Contract of the native asset
    /// * `beneficiary` - Platform-wide commission recipient
    ///
    /// # Errors
    /// * `Error::AlreadyInitialized` - If the directory has already been initialized
    pub fn initialize(
        e: &Env,
        admin: Address,
        registry: Address,
        native_token: Address,
        beneficiary: Address,
    ) -> Result<(), Error> {
        admin.require_auth();

        if is_initialized(e) {
            return Err(Error::AlreadyInitialized);
        }

        let config = DirectoryConfig {
            admin,
            registry,
            native_token,
            beneficiary,
            total_marketplaces: 0,
        };
        set_config(e, &config);
        set_initialized(e);
        Self::extend_instance_ttl(e);
        Ok(())
    }

    // ========================================================================
    // MARKETPLACE CREATION
    // ========================================================================

    /// Register a seller's marketplace by initializing the ledger instance
    /// at `ledger` and binding it to the (seller id, marketplace id) pair.
    ///
    /// The pair is permanent: one ledger per pair, no rebinding. The new
    /// ledger is owned by this directory and starts with the registry's
    /// currently enabled payment methods.
    ///
    /// # Errors
    /// * `Error::InvalidIdentifier` - Empty seller or marketplace id
    /// * `Error::InvalidCommissionRate` - Rate outside 1-5 percent
    /// * `Error::MarketplaceAlreadyExists` - Pair already bound
    pub fn create_marketplace(
        e: &Env,
        seller: Address,
        ledger: Address,
        seller_id: String,
        marketplace_id: String,
        commission_rate: u32,
    ) -> Result<Address, Error> {
        seller.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;

        if seller_id.is_empty() || marketplace_id.is_empty() {
            return Err(Error::InvalidIdentifier);
        }
        if !(MIN_COMMISSION_RATE..=MAX_COMMISSION_RATE).contains(&commission_rate) {
            return Err(Error::InvalidCommissionRate);
        }
        if marketplace_exists(e, &seller_id, &marketplace_id) {
            return Err(Error::MarketplaceAlreadyExists);
        }

        let methods =
            PaymentMethodRegistryClient::new(e, &config.registry).get_enabled_methods();

        MarketplaceLedgerClient::new(e, &ledger).initialize(
            &e.current_contract_address(),
            &seller_id,
            &marketplace_id,
            &seller,
            &config.beneficiary,
            &commission_rate,
            &config.native_token,
            &methods,
            &true,
        );

        set_marketplace(e, &seller_id, &marketplace_id, &ledger);

        let mut updated_config = config;
        updated_config.total_marketplaces += 1;
        set_config(e, &updated_config);

        MarketplaceCreatedEventData {
            seller,
            ledger: ledger.clone(),
            seller_id,
            marketplace_id,
        }
        .publish(e);

        Self::extend_instance_ttl(e);
        Ok(ledger)
    }

    // ========================================================================
    // LEDGER ALLOW-LIST ADMINISTRATION
    // ========================================================================

    /// Allow a payment method on one bound ledger (admin only). The
    /// directory forwards the change as the ledger's owner.
    pub fn add_ledger_payment_method(
        e: &Env,
        caller: Address,
        seller_id: String,
        marketplace_id: String,
        method: Address,
    ) -> Result<(), Error> {
        caller.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;
        if caller != config.admin {
            return Err(Error::Unauthorized);
        }

        let ledger = get_marketplace(e, &seller_id, &marketplace_id)
            .ok_or(Error::MarketplaceNotFound)?;
        MarketplaceLedgerClient::new(e, &ledger)
            .add_payment_method(&e.current_contract_address(), &method);

        Self::extend_instance_ttl(e);
        Ok(())
    }

    /// Disallow a payment method on one bound ledger (admin only).
    pub fn remove_ledger_payment_method(
        e: &Env,
        caller: Address,
        seller_id: String,
        marketplace_id: String,
        method: Address,
    ) -> Result<(), Error> {
        caller.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;
        if caller != config.admin {
            return Err(Error::Unauthorized);
        }

        let ledger = get_marketplace(e, &seller_id, &marketplace_id)
            .ok_or(Error::MarketplaceNotFound)?;
        MarketplaceLedgerClient::new(e, &ledger)
            .remove_payment_method(&e.current_contract_address(), &method);

        Self::extend_instance_ttl(e);
        Ok(())
    }

    // ========================================================================
    // QUERY
    // ========================================================================

    /// Ledger bound to the (seller id, marketplace id) pair.
    pub fn get_marketplace(
        e: &Env,
        seller_id: String,
        marketplace_id: String,
    ) -> Result<Address, Error> {
        get_marketplace(e, &seller_id, &marketplace_id).ok_or(Error::MarketplaceNotFound)
    }

    pub fn has_marketplace(e: &Env, seller_id: String, marketplace_id: String) -> bool {
        marketplace_exists(e, &seller_id, &marketplace_id)
    }

    /// Get directory configuration
    pub fn get_config(e: &Env) -> Result<DirectoryConfig, Error> {
        get_config(e).ok_or(Error::NotInitialized)
    }

    fn extend_instance_ttl(e: &Env) {
        e.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
    }
}

#[cfg(test)]
mod test;
