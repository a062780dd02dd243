use soroban_sdk::{contracttype, Address, String};

#[contracttype]
#[derive(Clone)]
pub enum StorageKey {
    Initialized,
    Config,
    Marketplace(String, String),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirectoryConfig {
    pub admin: Address,
    pub registry: Address,
    pub native_token: Address,
    pub beneficiary: Address,
    pub total_marketplaces: u64,
}

pub const DAY_IN_LEDGERS: u32 = 17280;
pub const PERSISTENT_TTL_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;
pub const PERSISTENT_TTL_THRESHOLD: u32 = PERSISTENT_TTL_AMOUNT - DAY_IN_LEDGERS;
