#![cfg(test)]

use soroban_sdk::{testutils::Address as _, Address, Env, String};

use marketplace_ledger::{MarketplaceLedger, MarketplaceLedgerClient};
use payment_registry::{PaymentMethodRegistry, PaymentMethodRegistryClient};

use crate::{SellerDirectory, SellerDirectoryClient};

fn setup_env() -> Env {
    let e = Env::default();
    e.mock_all_auths();
    e
}

struct DirectoryTest<'a> {
    admin: Address,
    seller: Address,
    beneficiary: Address,
    native_token: Address,
    token: Address,
    registry: PaymentMethodRegistryClient<'a>,
    client: SellerDirectoryClient<'a>,
}

/// Registry with one enabled token, plus an initialized directory.
fn setup<'a>(e: &'a Env) -> DirectoryTest<'a> {
    let admin = Address::generate(e);
    let seller = Address::generate(e);
    let beneficiary = Address::generate(e);
    let native_token = e
        .register_stellar_asset_contract_v2(Address::generate(e))
        .address();
    let token = e
        .register_stellar_asset_contract_v2(Address::generate(e))
        .address();

    let registry_id = e.register(PaymentMethodRegistry, ());
    let registry = PaymentMethodRegistryClient::new(e, &registry_id);
    registry.initialize(&admin);
    registry.add_method(&admin, &token);

    let directory_id = e.register(SellerDirectory, ());
    let client = SellerDirectoryClient::new(e, &directory_id);
    client.initialize(&admin, &registry_id, &native_token, &beneficiary);

    DirectoryTest {
        admin,
        seller,
        beneficiary,
        native_token,
        token,
        registry,
        client,
    }
}

fn register_ledger(e: &Env) -> Address {
    e.register(MarketplaceLedger, ())
}

fn sid(e: &Env, s: &str) -> String {
    String::from_str(e, s)
}

// ============================================================================
// INITIALIZATION
// ============================================================================

#[test]
fn test_initialize() {
    let e = setup_env();
    let t = setup(&e);

    let config = t.client.get_config();
    assert_eq!(config.admin, t.admin);
    assert_eq!(config.beneficiary, t.beneficiary);
    assert_eq!(config.native_token, t.native_token);
    assert_eq!(config.total_marketplaces, 0);
}

#[test]
#[should_panic]
fn test_initialize_already_initialized() {
    let e = setup_env();
    let t = setup(&e);

    let registry = t.client.get_config().registry;
    t.client
        .initialize(&t.admin, &registry, &t.native_token, &t.beneficiary);
}

#[test]
#[should_panic(expected = "Error(Contract, #2)")]
fn test_create_marketplace_not_initialized() {
    let e = setup_env();
    let directory_id = e.register(SellerDirectory, ());
    let client = SellerDirectoryClient::new(&e, &directory_id);

    let seller = Address::generate(&e);
    client.create_marketplace(
        &seller,
        &register_ledger(&e),
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-1"),
        &2,
    );
}

// ============================================================================
// MARKETPLACE CREATION
// ============================================================================

#[test]
fn test_create_marketplace() {
    let e = setup_env();
    let t = setup(&e);

    let ledger = register_ledger(&e);
    let created = t.client.create_marketplace(
        &t.seller,
        &ledger,
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-1"),
        &3,
    );

    assert_eq!(created, ledger);
    assert_eq!(
        t.client
            .get_marketplace(&sid(&e, "seller-1"), &sid(&e, "storefront-1")),
        ledger
    );
    assert_eq!(
        t.client
            .has_marketplace(&sid(&e, "seller-1"), &sid(&e, "storefront-1")),
        true
    );
    assert_eq!(t.client.get_config().total_marketplaces, 1);

    // The ledger is wired to the platform and owned by the directory.
    let ledger_client = MarketplaceLedgerClient::new(&e, &ledger);
    let config = ledger_client.get_config();
    assert_eq!(config.owner, t.client.address);
    assert_eq!(config.seller, t.seller);
    assert_eq!(config.beneficiary, t.beneficiary);
    assert_eq!(config.commission_rate, 3);
    assert_eq!(config.native_token, t.native_token);
    assert_eq!(config.account_buyers_only, true);

    // Seeded with the registry's enabled methods.
    assert_eq!(ledger_client.is_payment_method_allowed(&t.token), true);
}

#[test]
fn test_create_marketplace_accepts_rate_bounds() {
    let e = setup_env();
    let t = setup(&e);

    t.client.create_marketplace(
        &t.seller,
        &register_ledger(&e),
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-min"),
        &1,
    );
    t.client.create_marketplace(
        &t.seller,
        &register_ledger(&e),
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-max"),
        &5,
    );
    assert_eq!(t.client.get_config().total_marketplaces, 2);
}

#[test]
#[should_panic(expected = "Error(Contract, #5)")]
fn test_create_marketplace_rejects_zero_rate() {
    let e = setup_env();
    let t = setup(&e);

    t.client.create_marketplace(
        &t.seller,
        &register_ledger(&e),
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-1"),
        &0,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #5)")]
fn test_create_marketplace_rejects_excessive_rate() {
    let e = setup_env();
    let t = setup(&e);

    t.client.create_marketplace(
        &t.seller,
        &register_ledger(&e),
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-1"),
        &6,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #4)")]
fn test_create_marketplace_rejects_empty_seller_id() {
    let e = setup_env();
    let t = setup(&e);

    t.client.create_marketplace(
        &t.seller,
        &register_ledger(&e),
        &sid(&e, ""),
        &sid(&e, "storefront-1"),
        &2,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #4)")]
fn test_create_marketplace_rejects_empty_marketplace_id() {
    let e = setup_env();
    let t = setup(&e);

    t.client.create_marketplace(
        &t.seller,
        &register_ledger(&e),
        &sid(&e, "seller-1"),
        &sid(&e, ""),
        &2,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #6)")]
fn test_create_marketplace_rejects_duplicate_pair() {
    let e = setup_env();
    let t = setup(&e);

    t.client.create_marketplace(
        &t.seller,
        &register_ledger(&e),
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-1"),
        &2,
    );
    t.client.create_marketplace(
        &t.seller,
        &register_ledger(&e),
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-1"),
        &2,
    );
}

#[test]
fn test_same_seller_multiple_marketplaces() {
    let e = setup_env();
    let t = setup(&e);

    let first = register_ledger(&e);
    let second = register_ledger(&e);
    t.client.create_marketplace(
        &t.seller,
        &first,
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-1"),
        &2,
    );
    t.client.create_marketplace(
        &t.seller,
        &second,
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-2"),
        &2,
    );

    assert_eq!(
        t.client
            .get_marketplace(&sid(&e, "seller-1"), &sid(&e, "storefront-1")),
        first
    );
    assert_eq!(
        t.client
            .get_marketplace(&sid(&e, "seller-1"), &sid(&e, "storefront-2")),
        second
    );
    assert_eq!(t.client.get_config().total_marketplaces, 2);
}

#[test]
fn test_registry_changes_do_not_touch_existing_ledgers() {
    let e = setup_env();
    let t = setup(&e);

    let first = register_ledger(&e);
    t.client.create_marketplace(
        &t.seller,
        &first,
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-1"),
        &2,
    );

    // Enabled after creation: only ledgers created from now on see it.
    let late_token = e
        .register_stellar_asset_contract_v2(Address::generate(&e))
        .address();
    t.registry.add_method(&t.admin, &late_token);

    let second = register_ledger(&e);
    t.client.create_marketplace(
        &t.seller,
        &second,
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-2"),
        &2,
    );

    let first_client = MarketplaceLedgerClient::new(&e, &first);
    let second_client = MarketplaceLedgerClient::new(&e, &second);
    assert_eq!(first_client.is_payment_method_allowed(&late_token), false);
    assert_eq!(second_client.is_payment_method_allowed(&late_token), true);
}

#[test]
#[should_panic(expected = "Error(Contract, #1)")]
fn test_create_marketplace_rejects_initialized_ledger() {
    let e = setup_env();
    let t = setup(&e);

    let ledger = register_ledger(&e);
    t.client.create_marketplace(
        &t.seller,
        &ledger,
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-1"),
        &2,
    );
    // Rebinding the same instance under a fresh pair trips the ledger's
    // own initialization guard.
    t.client.create_marketplace(
        &t.seller,
        &ledger,
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-2"),
        &2,
    );
}

// ============================================================================
// LEDGER ALLOW-LIST ADMINISTRATION
// ============================================================================

#[test]
fn test_payment_method_passthrough() {
    let e = setup_env();
    let t = setup(&e);

    let ledger = register_ledger(&e);
    t.client.create_marketplace(
        &t.seller,
        &ledger,
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-1"),
        &2,
    );

    let extra = e
        .register_stellar_asset_contract_v2(Address::generate(&e))
        .address();
    let ledger_client = MarketplaceLedgerClient::new(&e, &ledger);
    assert_eq!(ledger_client.is_payment_method_allowed(&extra), false);

    t.client.add_ledger_payment_method(
        &t.admin,
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-1"),
        &extra,
    );
    assert_eq!(ledger_client.is_payment_method_allowed(&extra), true);

    t.client.remove_ledger_payment_method(
        &t.admin,
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-1"),
        &extra,
    );
    assert_eq!(ledger_client.is_payment_method_allowed(&extra), false);
}

#[test]
#[should_panic(expected = "Error(Contract, #3)")]
fn test_passthrough_rejects_non_admin() {
    let e = setup_env();
    let t = setup(&e);

    let ledger = register_ledger(&e);
    t.client.create_marketplace(
        &t.seller,
        &ledger,
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-1"),
        &2,
    );

    let extra = e
        .register_stellar_asset_contract_v2(Address::generate(&e))
        .address();
    t.client.add_ledger_payment_method(
        &t.seller,
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-1"),
        &extra,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #7)")]
fn test_passthrough_rejects_unknown_pair() {
    let e = setup_env();
    let t = setup(&e);

    let extra = e
        .register_stellar_asset_contract_v2(Address::generate(&e))
        .address();
    t.client.add_ledger_payment_method(
        &t.admin,
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-1"),
        &extra,
    );
}

// ============================================================================
// QUERY
// ============================================================================

#[test]
#[should_panic(expected = "Error(Contract, #7)")]
fn test_get_marketplace_unknown_pair() {
    let e = setup_env();
    let t = setup(&e);

    t.client
        .get_marketplace(&sid(&e, "seller-1"), &sid(&e, "storefront-1"));
}

// ============================================================================
// CREATED LEDGER POLICY
// ============================================================================

#[test]
#[should_panic(expected = "Error(Contract, #3)")]
fn test_created_ledger_rejects_contract_buyers() {
    let e = setup_env();
    let t = setup(&e);

    let ledger = register_ledger(&e);
    t.client.create_marketplace(
        &t.seller,
        &ledger,
        &sid(&e, "seller-1"),
        &sid(&e, "storefront-1"),
        &2,
    );

    // Directory-created ledgers only accept account-kind buyers; every
    // address the sandbox generates is contract-kind.
    let buyer = Address::generate(&e);
    MarketplaceLedgerClient::new(&e, &ledger).pay_with_coin(
        &buyer,
        &String::from_str(&e, "order-1"),
        &5_000_000,
        &5_000_000,
    );
}
