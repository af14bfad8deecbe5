//! Tests for the cart service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{FixtureCartStorage, MockCartStorage, MockCatalogRepository};
use crate::domain::{Cart, CouponCode, ErrorCode, MenuCategory, MenuItem};
use rstest::{fixture, rstest};
use rust_decimal_macros::dec;

const BURGER: MenuItemId = MenuItemId::new(1);
const PIZZA: MenuItemId = MenuItemId::new(4);
const PLATTER: MenuItemId = MenuItemId::new(10);

#[fixture]
fn catalog() -> Catalog {
    let item = |id: MenuItemId, name: &str, price: Decimal| {
        MenuItem::new(id, name, price, "/img/burger.png").expect("valid item")
    };
    Catalog::new(vec![
        MenuCategory::new("burgers", vec![item(BURGER, "Cheese Burger", dec!(9.99))])
            .expect("category"),
        MenuCategory::new(
            "pizzas",
            vec![
                item(PIZZA, "Margherita Pizza", dec!(10.99)),
                item(PLATTER, "Party Platter", dec!(600)),
            ],
        )
        .expect("category"),
    ])
    .expect("catalog")
}

fn make_service(catalog: Catalog) -> CartService<MockCatalogRepository> {
    let mut repo = MockCatalogRepository::new();
    repo.expect_menu().returning(move || Ok(catalog.clone()));
    CartService::new(Arc::new(repo))
}

fn failing_service() -> CartService<MockCatalogRepository> {
    let mut repo = MockCatalogRepository::new();
    repo.expect_menu()
        .returning(|| Err(CatalogRepositoryError::connection("menu file missing")));
    CartService::new(Arc::new(repo))
}

fn seeded_storage(quantities: &[(MenuItemId, u32)]) -> FixtureCartStorage {
    let mut cart = Cart::new();
    for &(id, quantity) in quantities {
        cart.add_item(id);
        for _ in 1..quantity {
            cart.increment(id);
        }
    }
    FixtureCartStorage::with_cart(cart)
}

#[rstest]
#[tokio::test]
async fn empty_cart_views_as_zero(catalog: Catalog) {
    let service = make_service(catalog);
    let storage = FixtureCartStorage::default();

    let summary = service.view(&storage).await.expect("view");
    assert!(summary.lines.is_empty());
    assert_eq!(summary.total, Decimal::ZERO);
    assert_eq!(summary.payable, Decimal::ZERO);
    assert_eq!(summary.discount, None);
    assert_eq!(summary.item_count, 0);
}

#[rstest]
#[tokio::test]
async fn reference_scenario_prices_and_discounts(catalog: Catalog) {
    let service = make_service(catalog);
    let storage = FixtureCartStorage::default();

    service.add_item(&storage, BURGER).await.expect("add burger");
    service.increment(&storage, BURGER).await.expect("increment");
    let summary = service.add_item(&storage, PIZZA).await.expect("add pizza");
    assert_eq!(summary.total, dec!(30.97));
    assert_eq!(summary.item_count, 3);

    let summary = service
        .apply_coupon(&storage, "SAVE10")
        .await
        .expect("coupon applies");
    let discount = summary.discount.expect("discount present");
    assert_eq!(discount.discounted_total, dec!(27.873));
    assert_eq!(discount.saved_amount, dec!(3.097));
    assert_eq!(summary.payable, dec!(27.873));
    assert_eq!(
        storage.stored_coupon(),
        Some(CouponCode::parse("SAVE10").expect("code"))
    );
}

#[rstest]
#[tokio::test]
async fn adding_unknown_items_is_not_found(catalog: Catalog) {
    let service = make_service(catalog);
    let storage = FixtureCartStorage::default();

    let err = service
        .add_item(&storage, MenuItemId::new(42))
        .await
        .expect_err("unknown item");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(storage.stored_cart(), None);
}

#[rstest]
#[tokio::test]
async fn adding_is_unavailable_without_a_menu() {
    let service = failing_service();
    let storage = FixtureCartStorage::default();

    let err = service
        .add_item(&storage, BURGER)
        .await
        .expect_err("menu unavailable");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn other_operations_fall_back_to_an_empty_menu() {
    let service = failing_service();
    let storage = seeded_storage(&[(BURGER, 1)]);

    let summary = service
        .increment(&storage, BURGER)
        .await
        .expect("increment still persists");
    assert_eq!(summary.total, Decimal::ZERO);
    assert_eq!(summary.stale_item_ids, vec![BURGER]);
    assert_eq!(
        storage.stored_cart().and_then(|cart| cart.quantity_of(BURGER)),
        Some(2)
    );
}

#[rstest]
#[tokio::test]
async fn decrementing_the_last_unit_removes_the_line(catalog: Catalog) {
    let service = make_service(catalog);
    let storage = seeded_storage(&[(BURGER, 1), (PIZZA, 1)]);

    let summary = service.decrement(&storage, BURGER).await.expect("decrement");
    assert_eq!(summary.lines.len(), 1);
    assert_eq!(summary.total, dec!(10.99));
}

#[rstest]
#[tokio::test]
async fn invalid_coupon_keeps_previous_discount(catalog: Catalog) {
    let service = make_service(catalog);
    let storage = seeded_storage(&[(PIZZA, 1)]);
    service
        .apply_coupon(&storage, "save20")
        .await
        .expect("valid coupon");

    let err = service
        .apply_coupon(&storage, "SAVE99")
        .await
        .expect_err("invalid coupon");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), INVALID_COUPON_MESSAGE);
    assert_eq!(
        err.details().and_then(|details| details.get("code")),
        Some(&serde_json::json!("invalid_coupon"))
    );

    let summary = service.view(&storage).await.expect("view");
    let discount = summary.discount.expect("still discounted");
    assert_eq!(discount.code.as_str(), "SAVE20");
}

#[rstest]
#[tokio::test]
async fn discount_tracks_cart_changes(catalog: Catalog) {
    let service = make_service(catalog);
    let storage = seeded_storage(&[(PIZZA, 1)]);
    service
        .apply_coupon(&storage, "SAVE10")
        .await
        .expect("coupon applies");

    let summary = service.increment(&storage, PIZZA).await.expect("increment");
    let discount = summary.discount.expect("discount present");
    assert_eq!(summary.total, dec!(21.98));
    assert_eq!(discount.saved_amount, dec!(2.198));
    assert_eq!(summary.payable, dec!(19.782));
}

#[rstest]
#[tokio::test]
async fn clearing_the_coupon_restores_full_price(catalog: Catalog) {
    let service = make_service(catalog);
    let storage = seeded_storage(&[(BURGER, 2)]);
    service
        .apply_coupon(&storage, "SAVE10")
        .await
        .expect("coupon applies");

    let summary = service.clear_coupon(&storage).await.expect("clear");
    assert_eq!(summary.discount, None);
    assert_eq!(summary.payable, dec!(19.98));
    assert_eq!(storage.stored_coupon(), None);
}

#[rstest]
#[tokio::test]
async fn offers_report_qualifying_strategies(catalog: Catalog) {
    let service = make_service(catalog);
    let storage = seeded_storage(&[(PLATTER, 2)]);

    let offers = service.offers(&storage).await.expect("offers");
    assert_eq!(offers.total, dec!(1200));
    let discounts: Vec<_> = offers
        .offers
        .iter()
        .map(|offer| (offer.id.as_str(), offer.discount))
        .collect();
    assert_eq!(
        discounts,
        vec![
            ("FLAT_50", dec!(50)),
            ("PERCENT_10", dec!(120.0)),
            ("FREE_SHIPPING", dec!(0)),
        ]
    );
}

#[rstest]
#[tokio::test]
async fn storage_failures_are_internal_errors(catalog: Catalog) {
    let service = make_service(catalog);
    let mut storage = MockCartStorage::new();
    storage.expect_load().return_once(|| Ok(None));
    storage.expect_load_coupon().return_once(|| Ok(None));
    storage
        .expect_save()
        .return_once(|_| Err(CartStorageError::write("cookie too large")));

    let err = service
        .add_item(&storage, BURGER)
        .await
        .expect_err("write fails");
    assert_eq!(err.code(), ErrorCode::InternalError);
}
