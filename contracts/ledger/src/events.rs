use soroban_sdk::{contractevent, Address, BytesN, String};

/// Published once per accepted payment. The order id is topic-indexed by
/// its SHA-256 hash so indexers can filter on a fixed-size value; the full
/// string rides in the data payload.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderPaidEventData {
    #[topic]
    pub buyer: Address,
    #[topic]
    pub order_id_hash: BytesN<32>,
    #[topic]
    pub payment_method: Option<Address>,
    pub order_id: String,
    pub price: i128,
    pub seller_income: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentMethodAddedEventData {
    #[topic]
    pub method: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentMethodRemovedEventData {
    #[topic]
    pub method: Address,
}

/// Published on every payout to the seller. `payment_method` is `None`
/// for native-asset withdrawals.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalEventData {
    #[topic]
    pub seller: Address,
    #[topic]
    pub payment_method: Option<Address>,
    pub amount: i128,
}
