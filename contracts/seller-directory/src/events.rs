use soroban_sdk::{contractevent, Address, String};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketplaceCreatedEventData {
    #[topic]
    pub seller: Address,
    pub ledger: Address,
    pub seller_id: String,
    pub marketplace_id: String,
}
