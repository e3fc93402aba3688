use srk_house::services::cart::{self, CartStore, MemoryCartStorage, CART_KEY};
use srk_house::test_utils::dish;
use srk_house::traits::CartStorage;

#[test]
fn add_increments_existing_line_instead_of_duplicating() {
    let storage = MemoryCartStorage::default();
    let cart = CartStore::new(&storage);
    let paneer = dish(1, "Paneer Tikka", 100.0, &["Starters"], true);

    cart.add(&paneer);
    let items = cart.add(&paneer);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 2);
    assert_eq!(cart::count(&items), 2);
    assert_eq!(cart::total(&items), 200.0);
}

#[test]
fn cart_keeps_price_seen_at_first_add() {
    let storage = MemoryCartStorage::default();
    let cart = CartStore::new(&storage);
    let mut naan = dish(2, "Butter Naan", 40.0, &["Breads"], true);

    cart.add(&naan);
    naan.price = 55.0;
    let items = cart.add(&naan);

    assert_eq!(items[0].price, 40.0);
    assert_eq!(cart::total(&items), 80.0);
}

#[test]
fn set_quantity_zero_or_negative_removes_line() {
    let storage = MemoryCartStorage::default();
    let cart = CartStore::new(&storage);
    cart.add(&dish(1, "Paneer Tikka", 100.0, &["Starters"], true));
    cart.add(&dish(2, "Butter Naan", 40.0, &["Breads"], true));

    let items = cart.set_quantity(1, 0);
    assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2]);

    let items = cart.set_quantity(2, -3);
    assert!(items.is_empty());
}

#[test]
fn set_quantity_updates_and_ignores_unknown_ids() {
    let storage = MemoryCartStorage::default();
    let cart = CartStore::new(&storage);
    cart.add(&dish(1, "Paneer Tikka", 100.0, &["Starters"], true));

    let items = cart.set_quantity(1, 4);
    assert_eq!(items[0].quantity, 4);
    assert_eq!(cart::total(&items), 400.0);

    let unchanged = cart.set_quantity(99, 2);
    assert_eq!(unchanged, items);
}

#[test]
fn remove_and_clear() {
    let storage = MemoryCartStorage::default();
    let cart = CartStore::new(&storage);
    cart.add(&dish(1, "Paneer Tikka", 100.0, &["Starters"], true));
    cart.add(&dish(2, "Butter Naan", 40.0, &["Breads"], true));

    let items = cart.remove(1);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, 2);

    assert!(cart.clear().is_empty());
    assert!(cart.get().is_empty());
    assert!(storage.load(CART_KEY).is_none());
}

#[test]
fn cart_survives_a_new_store_over_the_same_storage() {
    let storage = MemoryCartStorage::default();
    CartStore::new(&storage).add(&dish(3, "Dal Makhani", 180.0, &["Mains"], true));

    let reopened = CartStore::new(&storage);
    let items = reopened.get();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Dal Makhani");
}

#[test]
fn unreadable_cart_reads_as_empty() {
    let storage = MemoryCartStorage::default();
    storage.save(CART_KEY, "{not json".to_string());

    let cart = CartStore::new(&storage);
    assert!(cart.get().is_empty());
    assert_eq!(cart::total(&cart.get()), 0.0);
}

#[test]
fn empty_cart_totals_are_zero() {
    assert_eq!(cart::total(&[]), 0.0);
    assert_eq!(cart::count(&[]), 0);
}
