use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    /// Caller is not the directory admin.
    Unauthorized = 3,
    /// Seller or marketplace identifier is empty.
    InvalidIdentifier = 4,
    /// Commission rate outside the allowed 1-5 percent band.
    InvalidCommissionRate = 5,
    /// The (seller, marketplace) pair is already bound to a ledger.
    MarketplaceAlreadyExists = 6,
    /// No ledger bound to the (seller, marketplace) pair.
    MarketplaceNotFound = 7,
}
