use coinvend::domain::coin::{CoinPool, Denomination};
use coinvend::domain::money::Cents;
use coinvend::error::VendingError;

mod common;

#[test]
fn test_insert_increases_total_by_face_value() {
    let mut machine = common::factory_machine();
    let mut expected = Cents::ZERO;
    for denomination in Denomination::ALL {
        for count in 1..=3 {
            machine.insert_coin(denomination.value(), count).unwrap();
            expected += denomination.worth(count);
            assert_eq!(machine.inserted_total(), expected);
        }
    }
}

#[test]
fn test_cancel_returns_pre_cancel_total() {
    let mut machine = common::factory_machine();
    machine.insert_coin(100, 1).unwrap();
    machine.insert_coin(2, 4).unwrap();
    let before = machine.inserted_total();

    let returned = machine.cancel_and_return();
    assert_eq!(returned.total(), before);
    assert_eq!(machine.inserted_total(), Cents::ZERO);
}

#[test]
fn test_queries_do_not_mutate() {
    let mut machine = common::factory_machine();
    machine.insert_coin(50, 1).unwrap();

    let products = machine.list_products();
    let vault = machine.vault_snapshot();
    let _ = machine.is_vault_empty();
    let _ = machine.inserted_total();

    assert_eq!(machine.list_products(), products);
    assert_eq!(machine.vault_snapshot(), vault);
    assert_eq!(machine.inserted_total(), Cents(50));
}

#[test]
fn test_two_hundred_for_chips_returns_a_fifty() {
    let mut machine = common::factory_machine();
    let vault_before = machine.vault_snapshot();

    machine.insert_coin(100, 2).unwrap();
    let receipt = machine.buy_product(1).unwrap();

    assert_eq!(receipt.product_name, "Chips");
    let expected: CoinPool = [(Denomination::Fifty, 1)].into_iter().collect();
    assert_eq!(receipt.change, expected);

    let vault = machine.vault_snapshot();
    assert_eq!(
        vault.count(Denomination::Hundred),
        vault_before.count(Denomination::Hundred) + 2
    );
    assert_eq!(
        vault.count(Denomination::Fifty),
        vault_before.count(Denomination::Fifty) - 1
    );
    assert_eq!(machine.inserted_total(), Cents::ZERO);
    assert_eq!(machine.list_products()[0].quantity, 1);
}

#[test]
fn test_insufficient_funds_changes_nothing() {
    let mut machine = common::factory_machine();
    let products = machine.list_products();
    let vault = machine.vault_snapshot();

    machine.insert_coin(100, 1).unwrap();
    let err = machine.buy_product(1).unwrap_err();
    assert!(matches!(
        err,
        VendingError::InsufficientFunds {
            required: Cents(150),
            inserted: Cents(100)
        }
    ));

    assert_eq!(machine.list_products(), products);
    assert_eq!(machine.vault_snapshot(), vault);
    assert_eq!(machine.accumulated_revenue(), Cents::ZERO);
    assert_eq!(
        machine.inserted_coins(),
        [(Denomination::Hundred, 1)].into_iter().collect()
    );
}

#[test]
fn test_top_up_after_insufficient_funds() {
    let mut machine = common::factory_machine();
    machine.insert_coin(100, 1).unwrap();
    assert!(machine.buy_product(1).is_err());

    machine.insert_coin(50, 1).unwrap();
    let receipt = machine.buy_product(1).unwrap();
    assert!(receipt.change.is_empty());
}

#[test]
fn test_drained_vault_cannot_make_change() {
    let mut machine = common::factory_machine();
    machine.collect_all_vault_coins();
    assert!(machine.is_vault_empty());

    // 200 for a 150 item: 50 change, and only 100-coins available.
    machine.insert_coin(100, 2).unwrap();
    let err = machine.buy_product(1).unwrap_err();
    assert!(matches!(
        err,
        VendingError::ExactChangeUnavailable {
            change_due: Cents(50)
        }
    ));
    assert!(machine.is_vault_empty());
    assert_eq!(machine.inserted_total(), Cents(200));
    assert_eq!(machine.list_products()[0].quantity, 2);

    let returned = machine.cancel_and_return();
    assert_eq!(returned.count(Denomination::Hundred), 2);
}

#[test]
fn test_drained_vault_still_sells_for_exact_money() {
    let mut machine = common::factory_machine();
    machine.collect_all_vault_coins();

    machine.insert_coin(100, 1).unwrap();
    machine.insert_coin(50, 1).unwrap();
    machine.buy_product(1).unwrap();
    assert_eq!(machine.vault_snapshot().total(), Cents(150));
}

#[test]
fn test_add_then_remove_product_ignoring_case() {
    let mut machine = common::factory_machine();
    let tea = machine.add_product("Tea", Cents(80), 3).unwrap();

    assert!(machine.list_products().iter().any(|p| p.id == tea.id));
    assert!(machine.remove_product_by_name("tea"));
    assert!(machine.list_products().iter().all(|p| p.name != "Tea"));
    assert!(!machine.remove_product_by_name("tea"));
}

#[test]
fn test_revenue_and_vault_are_collected_separately() {
    let mut machine = common::factory_machine();
    machine.insert_coin(100, 2).unwrap();
    machine.buy_product(1).unwrap();

    let vault_value = machine.vault_snapshot().total();
    assert_eq!(machine.collect_all_vault_coins(), vault_value);
    assert_eq!(machine.accumulated_revenue(), Cents(150));
    assert_eq!(machine.collect_earnings(), Cents(150));
}

#[test]
fn test_insert_overflow_keeps_total_exact() {
    let mut machine = common::factory_machine();
    machine.insert_coin(1, u32::MAX).unwrap();
    let total = machine.inserted_total();

    let err = machine.insert_coin(1, 1).unwrap_err();
    assert!(matches!(err, VendingError::InvalidArgument(_)));
    assert_eq!(machine.inserted_total(), total);
    assert_eq!(total, Cents(u64::from(u32::MAX)));
}

#[test]
fn test_purchase_that_would_overflow_the_vault_is_rejected() {
    let mut machine = common::factory_machine();
    let products = machine.list_products();
    let vault = machine.vault_snapshot();
    // The vault already holds 50 one-coins.
    machine.insert_coin(1, u32::MAX - 10).unwrap();
    let inserted = machine.inserted_coins();

    let err = machine.buy_product(1).unwrap_err();
    assert!(matches!(err, VendingError::InvalidArgument(_)));
    assert_eq!(machine.list_products(), products);
    assert_eq!(machine.vault_snapshot(), vault);
    assert_eq!(machine.inserted_coins(), inserted);
    assert_eq!(machine.accumulated_revenue(), Cents::ZERO);

    assert_eq!(machine.cancel_and_return(), inserted);
}

#[test]
fn test_large_one_coin_payment_conserves_value() {
    let mut machine = common::factory_machine();
    let vault_before = machine.vault_snapshot().total();
    machine.insert_coin(1, u32::MAX - 50).unwrap();

    let receipt = machine.buy_product(1).unwrap();
    assert_eq!(
        machine.vault_snapshot().total(),
        vault_before + receipt.unit_price
    );
    assert_eq!(
        receipt.change_total() + receipt.unit_price,
        Cents(u64::from(u32::MAX - 50))
    );
}
