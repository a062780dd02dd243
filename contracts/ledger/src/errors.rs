use soroban_sdk::contracterror;

/// Failure conditions surfaced to callers. A returned error aborts the
/// whole invocation and the host discards every state change made by it.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ========== Lifecycle (1-2) ==========
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // ========== Caller identity (3-5) ==========
    /// Payments are restricted to account addresses; the buyer was a
    /// contract address.
    OnlyAccount = 3,
    /// Withdrawal attempted by anyone but the configured seller.
    OnlySeller = 4,
    /// Allow-list change attempted by anyone but the configured owner.
    OnlyOwner = 5,

    // ========== Input validation (6-10) ==========
    /// Empty order id.
    InvalidOrderId = 6,
    /// Price is zero or negative.
    InvalidPrice = 7,
    /// Payment method is not a contract address or is not allow-listed.
    InvalidContract = 8,
    /// Partial withdrawal of a zero or negative amount.
    ZeroAmount = 9,
    /// Allow-list entries must be contract addresses.
    NotAContract = 10,

    // ========== State conflict (11) ==========
    /// An order already exists under this id.
    OrderAlreadyPaid = 11,

    // ========== Funds (12-15) ==========
    /// Supplied native value is below the order price.
    InvalidValue = 12,
    /// Buyer token balance below the price at pre-check time.
    InsufficientBalance = 13,
    /// Nothing held to withdraw.
    NoFundsAvailable = 14,
    /// Partial withdrawal exceeds the held balance.
    InvalidAmount = 15,

    // ========== External transfer failures (16-19) ==========
    /// Pulling the payment from the buyer failed.
    PaymentTransferFailed = 16,
    /// Returning overpaid native value to the buyer failed.
    ExcessRefundFailed = 17,
    /// Forwarding the commission to the beneficiary failed.
    CommissionForwardFailed = 18,
    /// Paying out to the seller failed.
    WithdrawalFailed = 19,

    // ========== Arithmetic (20) ==========
    CommissionOverflow = 20,
}
