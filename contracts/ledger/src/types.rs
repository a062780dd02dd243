use soroban_sdk::{contracttype, Address, String};

#[contracttype]
#[derive(Clone)]
pub enum StorageKey {
    Initialized,
    Config,
    Order(String),
    PaymentMethod(Address),
}

/// Identity and commission parameters fixed at initialization.
///
/// `owner` is the administrative identity that manages the payment-method
/// allow-list; it is the creator of the ledger (the seller directory), not
/// the seller. `commission_rate` is a whole percentage validated by the
/// creator; the ledger trusts it as given.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerConfig {
    pub owner: Address,
    pub seller_id: String,
    pub marketplace_id: String,
    pub seller: Address,
    pub beneficiary: Address,
    pub commission_rate: u32,
    pub native_token: Address,
    pub account_buyers_only: bool,
}

/// A single buyer payment, keyed by the caller-supplied order id.
/// Written exactly once; never updated or removed afterwards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Order {
    pub buyer: Address,
    pub price: i128,
    pub seller_income: i128,
    /// `None` marks a native-asset payment.
    pub payment_method: Option<Address>,
}

/// Lookup projection of an order. A missing id comes back with
/// `exists == false` and every other field empty; the lookup itself
/// cannot fail.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderInfo {
    pub exists: bool,
    pub buyer: Option<Address>,
    pub price: i128,
    pub seller_income: i128,
    pub payment_method: Option<Address>,
}

pub const DAY_IN_LEDGERS: u32 = 17280;
pub const PERSISTENT_TTL_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;
pub const PERSISTENT_TTL_THRESHOLD: u32 = PERSISTENT_TTL_AMOUNT - DAY_IN_LEDGERS;
