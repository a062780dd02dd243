use soroban_sdk::{Address, Env, Vec};

use crate::types::{
    RegistryConfig, StorageKey, PERSISTENT_TTL_AMOUNT, PERSISTENT_TTL_THRESHOLD,
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

pub fn get_config(e: &Env) -> Option<RegistryConfig> {
    let key = StorageKey::Config;
    let config = e.storage().persistent().get::<_, RegistryConfig>(&key);
    if config.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    config
}

pub fn set_config(e: &Env, config: &RegistryConfig) {
    let key = StorageKey::Config;
    e.storage().persistent().set(&key, config);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

pub fn is_method_enabled(e: &Env, method: &Address) -> bool {
    e.storage()
        .persistent()
        .get::<_, bool>(&StorageKey::MethodEnabled(method.clone()))
        .unwrap_or(false)
}

pub fn get_enabled_methods(e: &Env) -> Vec<Address> {
    let key = StorageKey::EnabledMethods;
    let methods = e
        .storage()
        .persistent()
        .get::<_, Vec<Address>>(&key)
        .unwrap_or(Vec::new(e));
    if !methods.is_empty() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    methods
}

/// Keeps the per-method flag and the enumeration in sync. Callers check
/// the current flag first; this helper assumes the state actually flips.
pub fn set_method_enabled(e: &Env, method: &Address, enabled: bool) {
    let flag_key = StorageKey::MethodEnabled(method.clone());
    let list_key = StorageKey::EnabledMethods;
    let methods = get_enabled_methods(e);

    if enabled {
        e.storage().persistent().set(&flag_key, &true);
        e.storage()
            .persistent()
            .extend_ttl(&flag_key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
        let mut methods = methods;
        methods.push_back(method.clone());
        e.storage().persistent().set(&list_key, &methods);
    } else {
        e.storage().persistent().remove(&flag_key);
        let mut remaining = Vec::new(e);
        for m in methods.iter() {
            if m != method.clone() {
                remaining.push_back(m);
            }
        }
        e.storage().persistent().set(&list_key, &remaining);
    }
    e.storage()
        .persistent()
        .extend_ttl(&list_key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}
