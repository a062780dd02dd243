#![no_std]

mod errors;
mod events;
mod storage;
mod types;

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

use crate::errors::Error;
use crate::events::*;
use crate::storage::*;
use crate::types::*;

/// Number of ledgers in a day (assuming ~5 second block time)
const DAY_IN_LEDGERS: u32 = 17280;
const INSTANCE_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - DAY_IN_LEDGERS;

/// Strkey length shared by account (`G...`) and contract (`C...`) addresses.
const STRKEY_LEN: u32 = 56;

/// Platform-wide allow-list of token contracts accepted as payment.
///
/// The seller directory reads the enabled set when it creates a new
/// marketplace ledger; changes made here afterwards only affect ledgers
/// created later.
#[contract]
pub struct PaymentMethodRegistry;

#[contractimpl]
impl PaymentMethodRegistry {
    /// Initialize the registry.
    ///
    /// # Errors
    /// * `Error::AlreadyInitialized` - If the registry has already been initialized
    pub fn initialize(e: &Env, admin: Address) -> Result<(), Error> {
        admin.require_auth();

        if is_initialized(e) {
            return Err(Error::AlreadyInitialized);
        }

        set_config(e, &RegistryConfig { admin });
        set_initialized(e);
        Self::extend_instance_ttl(e);
        Ok(())
    }

    /// Enable a token contract as a payment method (admin only).
    /// Enabling an already-enabled method is a silent no-op.
    pub fn add_method(e: &Env, caller: Address, method: Address) -> Result<(), Error> {
        caller.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;
        if caller != config.admin {
            return Err(Error::Unauthorized);
        }
        if !is_contract_address(&method) {
            return Err(Error::NotAContract);
        }

        if !is_method_enabled(e, &method) {
            set_method_enabled(e, &method, true);
            PaymentMethodEnabledEventData { method }.publish(e);
        }

        Self::extend_instance_ttl(e);
        Ok(())
    }

    /// Disable a token contract as a payment method (admin only).
    /// Disabling an absent method is a silent no-op.
    pub fn remove_method(e: &Env, caller: Address, method: Address) -> Result<(), Error> {
        caller.require_auth();

        let config = get_config(e).ok_or(Error::NotInitialized)?;
        if caller != config.admin {
            return Err(Error::Unauthorized);
        }
        if !is_contract_address(&method) {
            return Err(Error::NotAContract);
        }

        if is_method_enabled(e, &method) {
            set_method_enabled(e, &method, false);
            PaymentMethodDisabledEventData { method }.publish(e);
        }

        Self::extend_instance_ttl(e);
        Ok(())
    }

    /// Whether a token contract is currently enabled.
    pub fn is_method_enabled(e: &Env, method: Address) -> bool {
        is_method_enabled(e, &method)
    }

    /// All currently enabled payment methods, in enablement order.
    pub fn get_enabled_methods(e: &Env) -> Vec<Address> {
        get_enabled_methods(e)
    }

    /// Get registry configuration
    pub fn get_config(e: &Env) -> Result<RegistryConfig, Error> {
        get_config(e).ok_or(Error::NotInitialized)
    }

    fn extend_instance_ttl(e: &Env) {
        e.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
    }
}

/// Reads the strkey discriminant: contract addresses render as `C...`.
fn is_contract_address(address: &Address) -> bool {
    let s = address.to_string();
    if s.len() != STRKEY_LEN {
        return false;
    }
    let mut buf = [0u8; STRKEY_LEN as usize];
    s.copy_into_slice(&mut buf);
    buf[0] == b'C'
}
