use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentMethodEnabledEventData {
    #[topic]
    pub method: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentMethodDisabledEventData {
    #[topic]
    pub method: Address,
}
