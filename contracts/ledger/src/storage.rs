use soroban_sdk::{Address, Env, String};

use crate::types::{
    LedgerConfig, Order, StorageKey, PERSISTENT_TTL_AMOUNT, PERSISTENT_TTL_THRESHOLD,
};

pub fn is_initialized(e: &Env) -> bool {
    e.storage()
        .instance()
        .get::<_, bool>(&StorageKey::Initialized)
        .unwrap_or(false)
}

pub fn set_initialized(e: &Env) {
    e.storage().instance().set(&StorageKey::Initialized, &true);
}

pub fn get_config(e: &Env) -> Option<LedgerConfig> {
    let key = StorageKey::Config;
    let config = e.storage().persistent().get::<_, LedgerConfig>(&key);
    if config.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    config
}

pub fn set_config(e: &Env, config: &LedgerConfig) {
    let key = StorageKey::Config;
    e.storage().persistent().set(&key, config);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

pub fn get_order(e: &Env, order_id: &String) -> Option<Order> {
    let key = StorageKey::Order(order_id.clone());
    let order = e.storage().persistent().get::<_, Order>(&key);
    if order.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    order
}

/// Orders are write-once; callers must check `order_exists` first.
pub fn set_order(e: &Env, order_id: &String, order: &Order) {
    let key = StorageKey::Order(order_id.clone());
    e.storage().persistent().set(&key, order);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

pub fn order_exists(e: &Env, order_id: &String) -> bool {
    e.storage()
        .persistent()
        .has(&StorageKey::Order(order_id.clone()))
}

pub fn is_payment_method_allowed(e: &Env, method: &Address) -> bool {
    e.storage()
        .persistent()
        .get::<_, bool>(&StorageKey::PaymentMethod(method.clone()))
        .unwrap_or(false)
}

/// Disallowing removes the entry outright, keeping the map sparse.
pub fn set_payment_method(e: &Env, method: &Address, allowed: bool) {
    let key = StorageKey::PaymentMethod(method.clone());
    if allowed {
        e.storage().persistent().set(&key, &true);
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    } else {
        e.storage().persistent().remove(&key);
    }
}
