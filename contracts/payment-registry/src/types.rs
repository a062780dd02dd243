use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone)]
pub enum StorageKey {
    Initialized,
    Config,
    MethodEnabled(Address),
    EnabledMethods,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryConfig {
    pub admin: Address,
}

pub const DAY_IN_LEDGERS: u32 = 17280;
pub const PERSISTENT_TTL_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;
pub const PERSISTENT_TTL_THRESHOLD: u32 = PERSISTENT_TTL_AMOUNT - DAY_IN_LEDGERS;
