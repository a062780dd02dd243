use soroban_sdk::{Address, Env, String};

use crate::types::{
    DirectoryConfig, StorageKey, PERSISTENT_TTL_AMOUNT, PERSISTENT_TTL_THRESHOLD,
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

pub fn get_config(e: &Env) -> Option<DirectoryConfig> {
    let key = StorageKey::Config;
    let config = e.storage().persistent().get::<_, DirectoryConfig>(&key);
    if config.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    config
}

pub fn set_config(e: &Env, config: &DirectoryConfig) {
    let key = StorageKey::Config;
    e.storage().persistent().set(&key, config);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

pub fn get_marketplace(
    e: &Env,
    seller_id: &String,
    marketplace_id: &String,
) -> Option<Address> {
    let key = StorageKey::Marketplace(seller_id.clone(), marketplace_id.clone());
    let ledger = e.storage().persistent().get::<_, Address>(&key);
    if ledger.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    ledger
}

pub fn set_marketplace(e: &Env, seller_id: &String, marketplace_id: &String, ledger: &Address) {
    let key = StorageKey::Marketplace(seller_id.clone(), marketplace_id.clone());
    e.storage().persistent().set(&key, ledger);
    e.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

pub fn marketplace_exists(e: &Env, seller_id: &String, marketplace_id: &String) -> bool {
    e.storage()
        .persistent()
        .has(&StorageKey::Marketplace(seller_id.clone(), marketplace_id.clone()))
}
